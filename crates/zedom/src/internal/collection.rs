//! Collection helpers

/// A sequence or an ordered keyed mapping
#[derive(Debug, Clone, Copy)]
pub enum Collection<'a, T> {
    Seq(&'a [T]),
    Keyed(&'a [(String, T)]),
}

/// Position of an item handed to `each`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Index(usize),
    Name(&'a str),
}

/// Visit every item in order: by index for sequences, by key for mappings
pub fn each<'a, T>(collection: Collection<'a, T>, mut callback: impl FnMut(&'a T, Key<'a>)) {
    match collection {
        Collection::Seq(items) => {
            for (index, item) in items.iter().enumerate() {
                callback(item, Key::Index(index));
            }
        }
        Collection::Keyed(entries) => {
            for (key, item) in entries {
                callback(item, Key::Name(key));
            }
        }
    }
}

/// Index of the first item at or after `from` matching `predicate`, or -1
pub fn find_index<T>(items: &[T], from: usize, mut predicate: impl FnMut(&T, usize) -> bool) -> isize {
    items
        .iter()
        .enumerate()
        .skip(from)
        .find(|(index, item)| predicate(item, *index))
        .map_or(-1, |(index, _)| index as isize)
}

/// Map every item to zero or more results and concatenate them in order
pub fn flat_map<T, R, I>(items: &[T], mut callback: impl FnMut(&T, usize) -> I) -> Vec<R>
where
    I: IntoIterator<Item = R>,
{
    let mut result = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        result.extend(callback(item, index));
    }
    result
}
