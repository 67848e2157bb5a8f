use tracing::debug;

/// Splits `total` across `group_count` groups as evenly as integers allow.
/// The first `total % group_count` groups receive one extra unit.
pub fn quota_shares(total: usize, group_count: usize) -> Vec<usize> {
    if group_count == 0 {
        return Vec::new();
    }

    let base = total / group_count;
    let remainder = total % group_count;
    (0..group_count)
        .map(|index| base + usize::from(index < remainder))
        .collect()
}

/// Picks up to `target` items with per-group quotas, backfills shortfalls from
/// the remaining items in source order, then interleaves groups round-robin.
///
/// Returns fewer than `target` items when the source runs out. Items whose
/// group is not listed in `group_order` are never selected.
pub fn select_balanced<T, F>(
    items: &[T],
    group_of: F,
    group_order: &[String],
    target: usize,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    if target == 0 || group_order.is_empty() {
        return Vec::new();
    }

    let group_index: Vec<Option<usize>> = items
        .iter()
        .map(|item| {
            let group = group_of(item);
            group_order.iter().position(|key| key == group)
        })
        .collect();

    let shares = quota_shares(target, group_order.len());
    let mut picks: Vec<Vec<usize>> = vec![Vec::new(); group_order.len()];
    let mut selected = vec![false; items.len()];
    let mut total = 0;

    for (slot, share) in shares.iter().enumerate() {
        let members = group_index
            .iter()
            .enumerate()
            .filter(|(_, group)| **group == Some(slot))
            .map(|(index, _)| index)
            .take(*share);
        for index in members {
            picks[slot].push(index);
            selected[index] = true;
            total += 1;
        }
    }

    if total < target {
        debug!(
            requested = target,
            filled = total,
            "backfilling groups below quota"
        );
        for (index, group) in group_index.iter().enumerate() {
            if total >= target {
                break;
            }
            if let Some(slot) = group {
                if !selected[index] {
                    picks[*slot].push(index);
                    selected[index] = true;
                    total += 1;
                }
            }
        }
    }

    interleave(picks)
        .into_iter()
        .map(|index| items[index].clone())
        .collect()
}

/// Emits one element from each group in turn, skipping exhausted groups.
pub fn interleave<T>(groups: Vec<Vec<T>>) -> Vec<T> {
    let total: usize = groups.iter().map(Vec::len).sum();
    let mut iters: Vec<_> = groups.into_iter().map(Vec::into_iter).collect();
    let mut output = Vec::with_capacity(total);

    while output.len() < total {
        for iter in &mut iters {
            if let Some(next) = iter.next() {
                output.push(next);
            }
        }
    }

    output
}
