use crate::core::{ClassLabel, Features};

/// Text labels, in the given order.
pub fn labels(names: &[&str]) -> Vec<ClassLabel> {
    names.iter().map(|&n| ClassLabel::from(n)).collect()
}

/// Lower-cased whitespace token counts.
pub fn bag_of_words(text: &str) -> Features {
    let mut x = Features::new();
    for token in text.split_whitespace() {
        *x.entry(token.to_lowercase()).or_insert(0.0) += 1.0;
    }
    x
}

/// Three short documents labelled by topic.
pub fn food_corpus() -> Vec<(Features, ClassLabel)> {
    let butcher = format!("food meat {}{}", "kitchen ".repeat(9), "job".repeat(5));
    vec![
        (bag_of_words("food food meat brain"), "health".into()),
        (bag_of_words(&butcher), "butcher".into()),
        (bag_of_words("food food meat job"), "health".into()),
    ]
}

/// Two well separated 2-D blobs, alternating between them.
pub fn two_blobs() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 1.0],
        vec![10.0, 10.0],
        vec![1.5, 0.5],
        vec![9.5, 10.5],
        vec![0.5, 1.5],
        vec![10.5, 9.5],
    ]
}
