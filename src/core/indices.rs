use hashbrown::HashMap;

use crate::types::EntryId;

/// Secondary index from a key to entry ids in store order.
pub type VecIndex<K> = HashMap<K, Vec<EntryId>>;

/// Removes the first occurrence of `id` from an index bucket.
pub(crate) fn remove_from_vec_index(v: &mut Vec<EntryId>, id: &str) {
    if let Some(pos) = v.iter().position(|x| x == id) {
        v.remove(pos);
    }
}
