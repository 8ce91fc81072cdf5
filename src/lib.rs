pub mod model;
pub mod models;
pub mod output;
pub mod sim;

#[cfg(test)]
mod test;
