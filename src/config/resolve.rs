//! Transition registry resolution across configuration inheritance.

use super::Config;
use crate::transition::TransitionMap;

/// Linearize a configuration's ancestry, most distant ancestor first and
/// the configuration itself last.
pub fn lineage(config: &Config) -> Vec<&Config> {
    let mut chain = vec![config];
    let mut current = config;
    while let Some(parent) = current.parent() {
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    chain
}

/// Merge transition maps ordered from most distant to most specific.
///
/// Later maps win on name collisions. Nothing passed in is modified, and an
/// empty chain resolves to an empty map.
pub fn resolve<'a, I>(chain: I) -> TransitionMap
where
    I: IntoIterator<Item = &'a TransitionMap>,
{
    chain
        .into_iter()
        .fold(TransitionMap::new(), |merged, map| merged.merge(map))
}
