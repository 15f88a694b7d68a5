use std::fmt::Debug;

use crate::face::Face;

/// Debug printer for one face of an arena tree.
pub fn dump<N, F>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    F: Face<N>,
    F::Key: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = dump::<N, F>(arena, F::l(n), &format!("{tab}  "));
            let right = dump::<N, F>(arena, F::r(n), &format!("{tab}  "));
            format!(
                "Node[{i}] [h={}] {{ {:?} }}\n{tab}L={left}\n{tab}R={right}",
                F::h(n),
                F::key(n)
            )
        }
    }
}
