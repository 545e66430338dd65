mod common;
mod duration;
