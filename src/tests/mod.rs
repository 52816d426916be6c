mod modes;
mod utils;
