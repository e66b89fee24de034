//! Reference tables (C2): the link-reference hash table and the footnote
//! found/used lists.

use crate::buffer::Buffer;
use std::collections::HashMap;

const REF_TABLE_SIZE: usize = 8;

fn hash_ref(id: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    for &b in id {
        let lower = b.to_ascii_lowercase() as u64;
        hash = lower
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash);
    }
    hash
}

#[derive(Debug, Clone)]
pub struct LinkRef {
    pub link: Buffer,
    pub title: Option<Buffer>,
}

/// Hash-bucketed link-reference table. Buckets are small (`REF_TABLE_SIZE`)
/// on purpose; lookups compare the full hash rather than the id bytes, so
/// two distinct ids that hash identically silently alias to the same entry.
/// This mirrors the original implementation and is preserved intentionally.
#[derive(Default)]
pub struct RefTable {
    buckets: [Vec<(u64, LinkRef)>; REF_TABLE_SIZE],
}

impl RefTable {
    pub fn new() -> RefTable {
        RefTable::default()
    }

    pub fn insert(&mut self, id: &[u8], link: Buffer, title: Option<Buffer>) {
        let hash = hash_ref(id);
        let bucket = &mut self.buckets[(hash as usize) % REF_TABLE_SIZE];
        if let Some(slot) = bucket.iter_mut().find(|(h, _)| *h == hash) {
            slot.1 = LinkRef { link, title };
        } else {
            bucket.push((hash, LinkRef { link, title }));
        }
    }

    pub fn find(&self, id: &[u8]) -> Option<&LinkRef> {
        let hash = hash_ref(id);
        let bucket = &self.buckets[(hash as usize) % REF_TABLE_SIZE];
        bucket.iter().find(|(h, _)| *h == hash).map(|(_, r)| r)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.is_empty())
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone)]
pub struct FootnoteRef {
    pub id: Vec<u8>,
    pub body: Buffer,
    pub num: u32,
}

/// Footnote definitions discovered during the pre-scan (`found`) and the
/// subset actually cited in the body, in first-use order (`used`).
#[derive(Default)]
pub struct FootnoteList {
    found: HashMap<u64, FootnoteRef>,
    order: Vec<u64>,
    used: Vec<u64>,
}

impl FootnoteList {
    pub fn new() -> FootnoteList {
        FootnoteList::default()
    }

    pub fn define(&mut self, id: &[u8], body: Buffer) {
        let hash = hash_ref(id);
        if !self.found.contains_key(&hash) {
            self.order.push(hash);
        }
        self.found.insert(
            hash,
            FootnoteRef {
                id: id.to_vec(),
                body,
                num: 0,
            },
        );
    }

    pub fn contains(&self, id: &[u8]) -> bool {
        self.found.contains_key(&hash_ref(id))
    }

    /// Marks `id` as used, assigning it the next sequential number on first
    /// use. Returns the assigned number, or `None` if no definition exists.
    pub fn mark_used(&mut self, id: &[u8]) -> Option<u32> {
        let hash = hash_ref(id);
        if !self.found.contains_key(&hash) {
            return None;
        }
        if let Some(pos) = self.used.iter().position(|h| *h == hash) {
            return Some(self.found[&self.used[pos]].num);
        }
        let num = self.used.len() as u32 + 1;
        self.found.get_mut(&hash).unwrap().num = num;
        self.used.push(hash);
        Some(num)
    }

    /// The used footnotes, in first-use order.
    pub fn used(&self) -> Vec<&FootnoteRef> {
        self.used.iter().map(|h| &self.found[h]).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn found_len(&self) -> usize {
        self.found.len()
    }

    pub fn used_len(&self) -> usize {
        self.used.len()
    }
}
