use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, NativeEndian, Unaligned,
    U32,
};

//------------ IndexNode -----------------------------------------------------

/// The read-optimized, persisted counterpart of a build-trie node.
///
/// An index node is stored under `__index__` + its absolute pattern and
/// only carries what the search walk needs: whether the node corresponds
/// to an actual catalog pattern, and for each child its subtree bound and
/// the pattern suffix relative to this node. The children keep the
/// descending `max_length` order they were written in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexNode {
    pub is_full: bool,
    pub children: Vec<ChildInfo>,
}

/// Information on whether to descend into a child.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChildInfo {
    /// The maximum significant pattern length reachable in the child's
    /// subtree.
    pub max_length: u32,
    /// The child's pattern with the parent's pattern stripped from its
    /// front. Children of the root carry absolute patterns.
    pub suffix: String,
}

#[derive(Debug, KnownLayout, Immutable, FromBytes, Unaligned, IntoBytes)]
#[repr(C)]
struct NodeHeader {
    is_full: u8,
    child_count: U32<NativeEndian>,
} // 5

#[derive(Debug, KnownLayout, Immutable, FromBytes, Unaligned, IntoBytes)]
#[repr(C)]
struct ChildHeader {
    max_length: U32<NativeEndian>,
    suffix_len: U32<NativeEndian>,
} // 8

impl IndexNode {
    pub fn leaf(is_full: bool) -> Self {
        IndexNode {
            is_full,
            children: vec![],
        }
    }

    /// Serialize into the framed byte representation stored in the
    /// key-value store: a node header followed by one child header plus
    /// suffix bytes per child.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = NodeHeader {
            is_full: self.is_full as u8,
            child_count: U32::new(self.children.len() as u32),
        }
        .as_bytes()
        .to_vec();

        for child in &self.children {
            bytes.extend_from_slice(
                ChildHeader {
                    max_length: child.max_length.into(),
                    suffix_len: U32::new(child.suffix.len() as u32),
                }
                .as_bytes(),
            );
            bytes.extend_from_slice(child.suffix.as_bytes());
        }

        bytes
    }

    /// Deserialize from the framed representation. Returns `None` on any
    /// truncated or otherwise undecodable input; the caller decides what
    /// that means for the index as a whole.
    pub fn from_bytes(bytes: &[u8]) -> Option<IndexNode> {
        let (header, mut rest) = NodeHeader::ref_from_prefix(bytes).ok()?;

        let child_count = u32::from(header.child_count) as usize;
        let mut children = Vec::with_capacity(child_count);

        for _ in 0..child_count {
            let (child_header, tail) = ChildHeader::ref_from_prefix(rest).ok()?;
            let suffix_len = u32::from(child_header.suffix_len) as usize;
            let suffix_bytes = tail.get(..suffix_len)?;

            children.push(ChildInfo {
                max_length: child_header.max_length.into(),
                suffix: String::from_utf8(suffix_bytes.to_vec()).ok()?,
            });
            rest = tail.get(suffix_len..)?;
        }

        if rest.is_empty() {
            Some(IndexNode {
                is_full: header.is_full != 0,
                children,
            })
        } else {
            None
        }
    }
}
