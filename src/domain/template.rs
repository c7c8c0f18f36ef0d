//! Position-wise template scoring and merging.
//!
//! Both operations require equal-length sequences. The prefix tree partitions
//! clusters by token count, so a length mismatch here means that partitioning
//! is broken; it is treated as an unrecoverable internal fault.

/// Score a cluster template against a tokenized line.
///
/// Returns the fraction of matching positions and the number of wildcard
/// positions in the template. Wildcard positions count toward the score only
/// when `include_wildcards` is set; training scores literal agreement only,
/// while exact lookups treat a wildcard position as satisfied by any token.
///
/// # Panics
/// Panics if the sequences differ in length.
pub(crate) fn similarity(
    template: &[String],
    tokens: &[String],
    wildcard: &str,
    include_wildcards: bool,
) -> (f64, usize) {
    assert_eq!(
        template.len(),
        tokens.len(),
        "compared token sequences must be the same length"
    );

    let mut matching = 0usize;
    let mut wildcards = 0usize;
    for (template_token, token) in template.iter().zip(tokens) {
        if template_token == wildcard {
            wildcards += 1;
        } else if template_token == token {
            matching += 1;
        }
    }
    if include_wildcards {
        matching += wildcards;
    }

    (matching as f64 / template.len() as f64, wildcards)
}

/// Merge a line's tokens into an existing template.
///
/// Positions where the template and the line agree keep the template token;
/// any disagreement becomes the wildcard. Generalization is monotonic: a
/// wildcard position never reverts to a literal.
///
/// # Panics
/// Panics if the sequences differ in length.
pub(crate) fn merge(template: &[String], tokens: &[String], wildcard: &str) -> Vec<String> {
    assert_eq!(
        template.len(),
        tokens.len(),
        "merged token sequences must be the same length"
    );

    template
        .iter()
        .zip(tokens)
        .map(|(template_token, token)| {
            if template_token == token {
                template_token.clone()
            } else {
                wildcard.to_owned()
            }
        })
        .collect()
}
