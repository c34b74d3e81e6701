// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Content comparison between ordered containers.

use std::fmt;

/// Where two sequences first disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mismatch<T> {
    /// Both sequences have an item at `position` and they differ.
    Differs { position: usize, left: T, right: T },
    /// One sequence ended at `position` while the other continued.
    Length { position: usize, left: Option<T>, right: Option<T> },
}

impl<T: fmt::Debug> fmt::Display for Mismatch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Differs { position, left, right } => {
                write!(f, "position {}: {:?} != {:?}", position, left, right)
            }
            Mismatch::Length { position, left, right } => {
                write!(f, "length differs at {}: {:?} vs {:?}", position, left, right)
            }
        }
    }
}

/// Walk two sequences in lockstep. `Ok` when they are identical.
pub fn same_contents<T, L, R>(left: L, right: R) -> Result<(), Mismatch<T>>
where
    T: PartialEq,
    L: IntoIterator<Item = T>,
    R: IntoIterator<Item = T>,
{
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    let mut position = 0;
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ok(()),
            (Some(l), Some(r)) => {
                if l != r {
                    return Err(Mismatch::Differs { position, left: l, right: r });
                }
            }
            (l, r) => return Err(Mismatch::Length { position, left: l, right: r }),
        }
        position += 1;
    }
}
