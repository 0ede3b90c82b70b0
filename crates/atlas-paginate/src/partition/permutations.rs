/// All orderings of `0..n` in lexicographic order, starting with the
/// identity
#[derive(Debug, Clone)]
pub(crate) struct Permutations {
    current: Option<Vec<usize>>,
}

impl Permutations {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            current: Some((0..n).collect()),
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        self.current = next_permutation(&current);
        Some(current)
    }
}

/// The lexicographic successor of `order`, `None` after the last one
fn next_permutation(order: &[usize]) -> Option<Vec<usize>> {
    let pivot = order.windows(2).rposition(|pair| pair[0] < pair[1])?;
    let successor = order.iter().rposition(|&value| value > order[pivot])?;

    let mut next = order.to_vec();
    next.swap(pivot, successor);
    next[pivot + 1..].reverse();
    Some(next)
}

pub(crate) fn factorial(n: usize) -> usize {
    (1..=n).product()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_items_in_lexicographic_order() {
        let all: Vec<Vec<usize>> = Permutations::new(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_count_matches_factorial() {
        for n in 0..=6 {
            assert_eq!(Permutations::new(n).count(), factorial(n));
        }
    }

    #[test]
    fn test_single_item() {
        let all: Vec<Vec<usize>> = Permutations::new(1).collect();
        assert_eq!(all, vec![vec![0]]);
    }
}
