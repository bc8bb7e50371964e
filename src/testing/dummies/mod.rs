mod corpora;

pub use corpora::{bag_of_words, food_corpus, labels, two_blobs};
