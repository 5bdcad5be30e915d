use crate::broad_phase::{BodyProxy, CollisionQuery};

/// Tests every unordered pair once, skipping pairs where both bodies are fixed.
///
/// Quadratic in the number of bodies. Useful for small scenes and as a reference to
/// check the octree against.
pub fn brute_force_collisions<C, F>(proxies: &[BodyProxy], mut detect: F) -> CollisionQuery<C>
where
    F: FnMut(&BodyProxy, &BodyProxy) -> Option<C>,
{
    let mut query = CollisionQuery::default();
    for (i, first) in proxies.iter().enumerate() {
        for second in &proxies[i + 1..] {
            if first.can_interact_with(second) {
                query.test_pair(first, second, &mut detect);
            }
        }
    }
    query
}
