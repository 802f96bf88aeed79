pub mod interface;
pub mod results;
pub mod sessions;
#[cfg(test)]
mod tests;
