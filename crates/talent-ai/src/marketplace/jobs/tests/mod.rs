mod allocation;
mod common;
mod lifecycle;
