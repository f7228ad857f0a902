use crate::domain::models::tree_node::ToolRecommendation;
use crate::domain::services::decision_tree_store::DecisionTree;
use random_source::RandomSource;

/// Picks one candidate uniformly, or `None` when there is nothing to pick.
pub fn pick_random<'a, T, R>(candidates: &'a [T], random: &mut R) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }
    candidates.get(random.next_index(candidates.len()))
}

/// "Surprise me": any recommendation from anywhere in the tree.
pub fn pick_random_workflow<'a, R>(tree: &'a DecisionTree, random: &mut R) -> Option<&'a ToolRecommendation>
where
    R: RandomSource + ?Sized,
{
    let candidates = tree.all_tools();
    pick_random(&candidates, random).copied()
}
