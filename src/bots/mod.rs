pub mod cpu;
pub mod human;
pub mod random;
pub mod registry;

pub use cpu::CpuBot;
pub use human::HumanBot;
pub use random::RandomBot;
