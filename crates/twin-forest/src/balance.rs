use crate::face::Face;

#[inline]
fn get_p<N, F: Face<N>>(arena: &[N], idx: u32) -> Option<u32> {
    F::p(&arena[idx as usize])
}
#[inline]
fn get_l<N, F: Face<N>>(arena: &[N], idx: u32) -> Option<u32> {
    F::l(&arena[idx as usize])
}
#[inline]
fn get_r<N, F: Face<N>>(arena: &[N], idx: u32) -> Option<u32> {
    F::r(&arena[idx as usize])
}
#[inline]
fn set_p<N, F: Face<N>>(arena: &mut [N], idx: u32, v: Option<u32>) {
    F::set_p(&mut arena[idx as usize], v);
}
#[inline]
fn set_l<N, F: Face<N>>(arena: &mut [N], idx: u32, v: Option<u32>) {
    F::set_l(&mut arena[idx as usize], v);
}
#[inline]
fn set_r<N, F: Face<N>>(arena: &mut [N], idx: u32, v: Option<u32>) {
    F::set_r(&mut arena[idx as usize], v);
}

/// Height of an optional subtree. Absent nodes count as 0, leaves as 1.
pub fn height<N, F: Face<N>>(arena: &[N], node: Option<u32>) -> u32 {
    node.map_or(0, |i| F::h(&arena[i as usize]))
}

/// Balance factor of `node`, `height(right) - height(left)`.
pub fn balance_of<N, F: Face<N>>(arena: &[N], node: u32) -> i32 {
    height::<N, F>(arena, get_r::<N, F>(arena, node)) as i32
        - height::<N, F>(arena, get_l::<N, F>(arena, node)) as i32
}

fn update_height<N, F: Face<N>>(arena: &mut [N], node: u32) {
    let h = height::<N, F>(arena, get_l::<N, F>(arena, node))
        .max(height::<N, F>(arena, get_r::<N, F>(arena, node)))
        + 1;
    F::set_h(&mut arena[node as usize], h);
}

/// Restore the parent link of `node`'s left child.
pub(crate) fn reparent_left<N, F: Face<N>>(arena: &mut [N], node: u32) {
    if let Some(l) = get_l::<N, F>(arena, node) {
        set_p::<N, F>(arena, l, Some(node));
    }
}

/// Restore the parent links of both children of `node`.
pub(crate) fn reparent_children<N, F: Face<N>>(arena: &mut [N], node: u32) {
    reparent_left::<N, F>(arena, node);
    if let Some(r) = get_r::<N, F>(arena, node) {
        set_p::<N, F>(arena, r, Some(node));
    }
}

fn rotate_left<N, F: Face<N>>(arena: &mut [N], node: u32) -> u32 {
    let pivot = get_r::<N, F>(arena, node).expect("left rotation has a right child");
    set_r::<N, F>(arena, node, get_l::<N, F>(arena, pivot));
    reparent_children::<N, F>(arena, node);
    set_l::<N, F>(arena, pivot, Some(node));
    reparent_children::<N, F>(arena, pivot);
    update_height::<N, F>(arena, node);
    update_height::<N, F>(arena, pivot);
    pivot
}

fn rotate_right<N, F: Face<N>>(arena: &mut [N], node: u32) -> u32 {
    let pivot = get_l::<N, F>(arena, node).expect("right rotation has a left child");
    set_l::<N, F>(arena, node, get_r::<N, F>(arena, pivot));
    reparent_children::<N, F>(arena, node);
    set_r::<N, F>(arena, pivot, Some(node));
    reparent_children::<N, F>(arena, pivot);
    update_height::<N, F>(arena, node);
    update_height::<N, F>(arena, pivot);
    pivot
}

/// Recompute `node`'s height and rotate if its subtrees differ by two.
///
/// Returns the subtree root after rebalancing. The returned root's parent
/// link is stale; the caller re-links it.
pub(crate) fn rebalance<N, F: Face<N>>(arena: &mut [N], node: u32) -> u32 {
    update_height::<N, F>(arena, node);
    let bf = balance_of::<N, F>(arena, node);
    if bf == 2 {
        let r = get_r::<N, F>(arena, node).expect("right-heavy node has a right child");
        if balance_of::<N, F>(arena, r) < 0 {
            let pivot = rotate_right::<N, F>(arena, r);
            set_r::<N, F>(arena, node, Some(pivot));
            reparent_children::<N, F>(arena, node);
        }
        return rotate_left::<N, F>(arena, node);
    }
    if bf == -2 {
        let l = get_l::<N, F>(arena, node).expect("left-heavy node has a left child");
        if balance_of::<N, F>(arena, l) > 0 {
            let pivot = rotate_left::<N, F>(arena, l);
            set_l::<N, F>(arena, node, Some(pivot));
            reparent_children::<N, F>(arena, node);
        }
        return rotate_right::<N, F>(arena, node);
    }
    node
}

/// Leftmost node of the subtree rooted at `node`.
pub fn subtree_min<N, F: Face<N>>(arena: &[N], node: u32) -> u32 {
    let mut curr = node;
    while let Some(l) = get_l::<N, F>(arena, curr) {
        curr = l;
    }
    curr
}

/// Rightmost node of the subtree rooted at `node`.
pub fn subtree_max<N, F: Face<N>>(arena: &[N], node: u32) -> u32 {
    let mut curr = node;
    while let Some(r) = get_r::<N, F>(arena, curr) {
        curr = r;
    }
    curr
}

/// Splice the minimum node out of the subtree rooted at `node`.
///
/// Returns the remaining subtree root, rebalanced on the way back up. The
/// detached minimum keeps its links; the caller re-links it in full.
pub(crate) fn detach_min<N, F: Face<N>>(arena: &mut [N], node: u32) -> Option<u32> {
    let Some(l) = get_l::<N, F>(arena, node) else {
        return get_r::<N, F>(arena, node);
    };
    let rest = detach_min::<N, F>(arena, l);
    set_l::<N, F>(arena, node, rest);
    reparent_children::<N, F>(arena, node);
    Some(rebalance::<N, F>(arena, node))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct N {
        key: u64,
        p: Option<u32>,
        l: Option<u32>,
        r: Option<u32>,
        h: u32,
    }

    enum KeyFace {}

    impl Face<N> for KeyFace {
        type Key = u64;

        fn p(node: &N) -> Option<u32> {
            node.p
        }
        fn l(node: &N) -> Option<u32> {
            node.l
        }
        fn r(node: &N) -> Option<u32> {
            node.r
        }
        fn h(node: &N) -> u32 {
            node.h
        }
        fn set_p(node: &mut N, v: Option<u32>) {
            node.p = v;
        }
        fn set_l(node: &mut N, v: Option<u32>) {
            node.l = v;
        }
        fn set_r(node: &mut N, v: Option<u32>) {
            node.r = v;
        }
        fn set_h(node: &mut N, v: u32) {
            node.h = v;
        }
        fn key(node: &N) -> &u64 {
            &node.key
        }
    }

    fn node(key: u64) -> N {
        N {
            key,
            h: 1,
            ..Default::default()
        }
    }

    #[test]
    fn rebalance_rotates_a_left_left_chain() {
        // 2 -> 1 -> 0 hanging off the left, heights stale above the leaf.
        let mut arena = vec![node(30), node(20), node(10)];
        arena[0].l = Some(1);
        arena[1].p = Some(0);
        arena[1].l = Some(2);
        arena[2].p = Some(1);
        arena[1].h = 2;
        arena[0].h = 3;

        let root = rebalance::<N, KeyFace>(&mut arena, 0);
        assert_eq!(root, 1);
        assert_eq!(arena[1].l, Some(2));
        assert_eq!(arena[1].r, Some(0));
        assert_eq!(arena[2].p, Some(1));
        assert_eq!(arena[0].p, Some(1));
        assert_eq!(arena[1].h, 2);
        assert_eq!(arena[0].h, 1);
        assert_eq!(balance_of::<N, KeyFace>(&arena, 1), 0);
    }

    #[test]
    fn rebalance_resolves_a_right_left_kink() {
        // 0 -> right 1 -> left 2 needs a double rotation.
        let mut arena = vec![node(10), node(30), node(20)];
        arena[0].r = Some(1);
        arena[1].p = Some(0);
        arena[1].l = Some(2);
        arena[2].p = Some(1);
        arena[1].h = 2;
        arena[0].h = 3;

        let root = rebalance::<N, KeyFace>(&mut arena, 0);
        assert_eq!(root, 2);
        assert_eq!(arena[2].l, Some(0));
        assert_eq!(arena[2].r, Some(1));
        assert_eq!(arena[0].p, Some(2));
        assert_eq!(arena[1].p, Some(2));
        assert_eq!(arena[2].h, 2);
    }

    #[test]
    fn detach_min_splices_out_the_leftmost_node() {
        let mut arena = vec![node(20), node(10), node(30)];
        arena[0].l = Some(1);
        arena[0].r = Some(2);
        arena[1].p = Some(0);
        arena[2].p = Some(0);
        arena[0].h = 2;

        let min = subtree_min::<N, KeyFace>(&arena, 0);
        assert_eq!(min, 1);
        let rest = detach_min::<N, KeyFace>(&mut arena, 0);
        assert_eq!(rest, Some(0));
        assert_eq!(arena[0].l, None);
        assert_eq!(arena[0].r, Some(2));
        assert_eq!(arena[0].h, 2);
    }
}
