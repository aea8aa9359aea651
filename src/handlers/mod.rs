// handlers/mod.rs - one module per resource family plus service endpoints
//
// Notes and folders expose the same shape:
//   GET/POST           /api/<resource>
//   GET/DELETE/PATCH   /api/<resource>/:id
// The `/:id` handlers take an `Existing<R>` extractor, so the 404 for an
// unknown id is produced before any handler body runs.

pub mod folders;
pub mod notes;
pub mod system;
