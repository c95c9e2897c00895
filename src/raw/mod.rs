mod arena;
mod check;
mod handle;
mod node;
mod raw_llrb_map;
mod walk;

pub(crate) use raw_llrb_map::RawLlrbMap;
pub(crate) use walk::Walk;
