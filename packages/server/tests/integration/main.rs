mod common;
mod frontend;
