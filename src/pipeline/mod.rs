// Article pipeline: turns a CSV export into the classified collection.

pub mod load;
