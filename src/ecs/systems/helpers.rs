use rand::Rng;
use rand::rngs::SmallRng;

/// Pick up to `count` distinct elements from `pool`, uniformly at random.
/// Partial Fisher-Yates so the draw order is a pure function of the RNG
/// stream.
pub(crate) fn unique_random_picks<T: Copy>(rng: &mut SmallRng, pool: &[T], count: usize) -> Vec<T> {
    let mut indices: Vec<usize> = (0..pool.len()).collect();
    let take = count.min(pool.len());
    for i in 0..take {
        let j = rng.random_range(i..indices.len());
        indices.swap(i, j);
    }
    indices[..take].iter().map(|&i| pool[i]).collect()
}
