use serde::{Deserialize, Serialize};

use crate::action::PlayerId;

/// Order in which seats take turns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Seat that follows `from` in the given direction, wrapping around the table.
pub fn next_index(from: PlayerId, direction: Direction, player_count: usize) -> PlayerId {
    debug_assert!(player_count > 0 && from < player_count);
    match direction {
        Direction::Forward => (from + 1) % player_count,
        Direction::Reverse => {
            if from == 0 {
                player_count - 1
            } else {
                from - 1
            }
        }
    }
}

/// Turn pointer plus direction for a fixed number of seats.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnOrder {
    current: PlayerId,
    direction: Direction,
    player_count: usize,
}

impl TurnOrder {
    pub fn new(player_count: usize, first: PlayerId) -> Self {
        Self {
            current: first,
            direction: Direction::Forward,
            player_count,
        }
    }

    pub fn current(&self) -> PlayerId {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Seat that would act after the current one.
    pub fn peek_next(&self) -> PlayerId {
        next_index(self.current, self.direction, self.player_count)
    }

    pub fn advance(&mut self) -> PlayerId {
        self.current = self.peek_next();
        self.current
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.flipped();
    }

    /// Seats starting at `from` and walking the current direction once around.
    pub fn seats_from(&self, from: PlayerId) -> Vec<PlayerId> {
        let mut seats = Vec::with_capacity(self.player_count);
        let mut seat = from;
        for _ in 0..self.player_count {
            seats.push(seat);
            seat = next_index(seat, self.direction, self.player_count);
        }
        seats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_wraps() {
        let mut order = TurnOrder::new(4, 0);
        let seq: Vec<_> = (0..5).map(|_| order.advance()).collect();
        assert_eq!(seq, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn reverse_takes_effect_immediately() {
        let mut order = TurnOrder::new(4, 2);
        order.reverse();
        let seq: Vec<_> = (0..4).map(|_| order.advance()).collect();
        assert_eq!(seq, vec![1, 0, 3, 2]);
    }

    #[test]
    fn seats_follow_direction() {
        let mut order = TurnOrder::new(3, 1);
        assert_eq!(order.seats_from(1), vec![1, 2, 0]);
        order.reverse();
        assert_eq!(order.seats_from(1), vec![1, 0, 2]);
    }
}
