// Mon Oct 19 2026 - Alex

use crate::form::FormType;
use crate::memory::MemoryContext;
use crate::utils::BinaryUtils;
use log::debug;
use std::collections::HashSet;

/// Singly linked list node: data pointer then next pointer.
pub const LIST_NODE_SIZE: usize = 8;
/// Simple array descriptor: data pointer, capacity, count.
pub const ARRAY_DESCRIPTOR_SIZE: usize = 12;
pub const POINTER_SIZE: usize = 4;

/// Walks embedded singly linked lists without trusting their shape.
#[derive(Debug, Clone, Copy)]
pub struct ListWalker {
    max_items: usize,
}

impl ListWalker {
    pub fn new(max_items: usize) -> Self {
        Self { max_items }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Visits the list whose head node sits inline at `field` of `buf`, the struct read from
    /// `struct_offset`. `visit` receives each non-null data pointer and may reject it.
    ///
    /// Stops at a null or unresolvable next pointer, at a node already seen, or after
    /// `max_items` nodes. Items gathered before the stop are kept.
    pub fn walk<T, F>(
        &self,
        ctx: &MemoryContext,
        buf: &[u8],
        struct_offset: u64,
        field: usize,
        mut visit: F,
    ) -> Vec<T>
    where
        F: FnMut(u32) -> Option<T>,
    {
        let mut items = Vec::new();
        let mut node = match buf.get(field..field + LIST_NODE_SIZE) {
            Some(bytes) => bytes.to_vec(),
            None => return items,
        };
        let mut node_offset = struct_offset + field as u64;
        let mut visited: HashSet<u64> = HashSet::new();

        loop {
            if visited.len() >= self.max_items {
                debug!("list at {:#x} truncated at {} nodes", struct_offset, self.max_items);
                break;
            }
            if !visited.insert(node_offset) {
                debug!("list at {:#x} loops back to {:#x}", struct_offset, node_offset);
                break;
            }

            let data = BinaryUtils::read_u32_be(&node, 0).unwrap_or(0);
            let next = BinaryUtils::read_u32_be(&node, 4).unwrap_or(0);

            if data != 0 {
                if let Some(item) = visit(data) {
                    items.push(item);
                }
            }

            if next == 0 {
                break;
            }
            let Some(next_offset) = ctx.address_to_offset(next) else {
                break;
            };
            let Some(bytes) = ctx.read_bytes(next_offset, LIST_NODE_SIZE) else {
                break;
            };
            node = bytes;
            node_offset = next_offset;
        }

        items
    }
}

/// The element table of a simple pointer array, read in one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerArray {
    table: Vec<u8>,
}

impl PointerArray {
    /// Reads the array descriptor at `field` of `buf`. The stated count is clamped to
    /// `max_elements`; an empty array yields an empty table.
    pub fn read(ctx: &MemoryContext, buf: &[u8], field: usize, max_elements: usize) -> Option<Self> {
        let data = BinaryUtils::read_u32_be(buf, field)?;
        let count = BinaryUtils::read_u32_be(buf, field + 8)? as usize;

        if count == 0 {
            return Some(Self { table: Vec::new() });
        }
        let count = if count > max_elements {
            debug!("array count {} clamped to {}", count, max_elements);
            max_elements
        } else {
            count
        };

        let offset = ctx.address_to_offset(data)?;
        let table = ctx.read_bytes(offset, count.checked_mul(POINTER_SIZE)?)?;
        Some(Self { table })
    }

    pub fn len(&self) -> usize {
        self.table.len() / POINTER_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn pointers(&self) -> impl Iterator<Item = u32> + '_ {
        self.table
            .chunks_exact(POINTER_SIZE)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
    }

    /// Resolves every element independently; failures are dropped.
    pub fn form_ids(&self, ctx: &MemoryContext, expected: Option<FormType>) -> Vec<u32> {
        (0..self.len())
            .filter_map(|i| ctx.follow_pointer_to_form_id(&self.table, i * POINTER_SIZE, expected))
            .collect()
    }
}
