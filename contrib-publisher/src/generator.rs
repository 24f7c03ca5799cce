/// Синтетическая котировка
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Quote {
    pub(crate) bid: f64,
    pub(crate) ask: f64,
}

/// Счётчик, из которого строятся котировки.
///
/// Увеличивается на 1 перед каждым сообщением: `ask = counter`,
/// `bid = 0.5 * counter`. Первое сообщение получает `ask = 2`.
#[derive(Debug, Clone)]
pub(crate) struct QuoteGenerator {
    counter: u64,
}

impl Default for QuoteGenerator {
    fn default() -> Self {
        Self { counter: 1 }
    }
}

impl QuoteGenerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// следующая котировка
    pub(crate) fn next_quote(&mut self) -> Quote {
        self.counter += 1;
        let value = self.counter as f64;
        Quote {
            bid: 0.5 * value,
            ask: value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_quote_starts_at_two() {
        let mut g = QuoteGenerator::new();
        assert_eq!(g.next_quote(), Quote { bid: 1.0, ask: 2.0 });
    }

    #[test]
    fn counter_strictly_increases_by_one() {
        let mut g = QuoteGenerator::new();
        let asks: Vec<f64> = (0..5).map(|_| g.next_quote().ask).collect();
        assert_eq!(asks, vec![2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn bid_is_half_of_ask() {
        let mut g = QuoteGenerator::new();
        for _ in 0..10 {
            let q = g.next_quote();
            assert_eq!(q.bid, 0.5 * q.ask);
        }
    }
}
