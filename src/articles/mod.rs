// Article data: the classified record type and the presentation view over it.

pub mod models;
pub mod view;
