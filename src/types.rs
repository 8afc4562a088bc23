//! Shared type aliases used across the crate.

/// Type used to index the nodes.
pub type NodeT = usize;
/// Type used to index the directed edges.
pub type EdgeT = usize;
/// Type used for the edge weights.
pub type WeightT = f32;
/// Type used to index the node types.
pub type NodeTypeT = u16;
/// Result with the error messages of this crate.
pub type Result<T> = std::result::Result<T, String>;

/// Trait used by the vocabularies to convert their index type from and to usize.
pub trait ToFromUsize {
    fn from_usize(v: usize) -> Self;
    fn to_usize(v: Self) -> usize;
}

macro_rules! impl_to_from_usize {
    ($($ty:ty)*) => {
        $(
            impl ToFromUsize for $ty {
                #[inline(always)]
                fn from_usize(v: usize) -> $ty {
                    v as $ty
                }
                #[inline(always)]
                fn to_usize(v: $ty) -> usize {
                    v as usize
                }
            }
        )*
    };
}

impl_to_from_usize!(u8 u16 u32 u64 usize);
