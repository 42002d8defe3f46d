pub mod ratings;

pub use ratings::{
    read_curated_ratings, read_popular_ratings, write_compared_ratings, write_popular_ratings,
};
