use template_miner::{BuildError, TemplateMiner, BUCKET_SECONDS, MAX_SAMPLES};

#[test]
fn test_variable_positions_generalize_to_wildcard() {
    let mut miner = TemplateMiner::new();
    miner.train("connection from 10.0.0.1 failed", 100);
    let cluster = miner.train("connection from 10.0.0.2 failed", 110);

    assert_eq!(cluster.template(), "connection from <*> failed");
    assert_eq!(cluster.size(), 2);
    assert_eq!(miner.cluster_count(), 1);
}

#[test]
fn test_unrelated_lines_stay_separate() {
    let mut miner = TemplateMiner::new();
    miner.train("user login success", 0);
    miner.train("payment processed ok", 0);

    assert_eq!(miner.cluster_count(), 2);
    let templates: Vec<String> = miner.clusters().iter().map(|c| c.template()).collect();
    assert!(templates.contains(&"user login success".to_string()));
    assert!(templates.contains(&"payment processed ok".to_string()));
}

#[test]
fn test_generalization_is_monotonic() {
    let mut miner = TemplateMiner::new();
    miner.train("request to backend timed out", 0);
    miner.train("request to database timed out", 0);
    // A line agreeing with the original literal cannot undo the wildcard.
    let cluster = miner.train("request to backend timed out", 0);

    assert_eq!(cluster.template(), "request to <*> timed out");
    assert_eq!(cluster.size(), 3);
}

#[test]
fn test_token_count_is_a_hard_partition() {
    let mut miner = TemplateMiner::new();
    miner.train("service restarted", 0);
    miner.train("service restarted after crash", 0);

    assert_eq!(miner.cluster_count(), 2);
}

#[test]
fn test_find_match_is_read_only() {
    let mut miner = TemplateMiner::new();
    miner.train("worker 17 heartbeat ok", 0);
    miner.train("worker 23 heartbeat ok", 0);

    // Wildcard positions accept anything; literals must match exactly.
    let matched = miner.find_match("worker 99 heartbeat ok").unwrap();
    assert_eq!(matched.template(), "worker <*> heartbeat ok");
    assert_eq!(matched.size(), 2);

    assert!(miner.find_match("worker 99 heartbeat late").is_none());
    assert!(miner.find_match("completely novel line here").is_none());

    // Neither lookup created or mutated a cluster.
    assert_eq!(miner.cluster_count(), 1);
    assert_eq!(miner.clusters()[0].size(), 2);
}

#[test]
fn test_repeated_training_is_idempotent_on_the_template() {
    let mut miner = TemplateMiner::new();
    for _ in 0..50 {
        miner.train("cache entry expired early", 0);
    }

    assert_eq!(miner.cluster_count(), 1);
    let cluster = &miner.clusters()[0];
    assert_eq!(cluster.template(), "cache entry expired early");
    assert_eq!(cluster.size(), 50);
    assert_eq!(cluster.samples().len(), MAX_SAMPLES);
}

#[test]
fn test_volume_buckets_follow_timestamps() {
    let mut miner = TemplateMiner::new();
    miner.train("disk usage high", 5);
    miner.train("disk usage high", 12);
    miner.train("disk usage high", 14);
    miner.train("disk usage high", 31);

    let clusters = miner.clusters();
    let volume = clusters[0].volume();
    assert_eq!(volume.total(), 4);

    let buckets = volume.buckets();
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[0].timestamp, 0);
    assert_eq!(buckets[1].timestamp, BUCKET_SECONDS);
    assert_eq!(buckets[1].count, 2);
    assert_eq!(buckets[2].timestamp, 30);

    // Half-open range: the bucket at 30 is excluded.
    let counted: u64 = volume.range(0, 30).iter().map(|b| b.count).sum();
    assert_eq!(counted, 3);
}

#[test]
fn test_extra_delimiters_split_key_value_pairs() {
    let mut miner = TemplateMiner::builder()
        .with_extra_delimiters(["=", ","])
        .build()
        .unwrap();
    miner.train("level=info, msg=started", 0);
    let cluster = miner.train("level=warn, msg=started", 0);

    assert!(cluster.template().contains("<*>"));
    assert_eq!(miner.cluster_count(), 1);
}

#[test]
fn test_custom_wildcard_marker_appears_in_templates() {
    let mut miner = TemplateMiner::builder()
        .with_wildcard_token("%")
        .build()
        .unwrap();
    miner.train("query took 12 ms", 0);
    let cluster = miner.train("query took 340 ms", 0);

    assert_eq!(cluster.template(), "query took % ms");
    assert!(miner.find_match("query took 7 ms").is_some());
}

#[test]
fn test_empty_and_blank_lines_share_a_cluster() {
    let mut miner = TemplateMiner::new();
    miner.train("", 0);
    let cluster = miner.train(" \t ", 0);

    assert_eq!(cluster.size(), 2);
    assert_eq!(miner.cluster_count(), 1);
}

#[test]
fn test_builder_validation() {
    assert!(matches!(
        TemplateMiner::builder().with_cluster_depth(1).build(),
        Err(BuildError::DepthTooSmall(1))
    ));
    assert!(matches!(
        TemplateMiner::builder().with_similarity_threshold(2.0).build(),
        Err(BuildError::ThresholdOutOfRange(_))
    ));
    assert!(TemplateMiner::builder().with_cluster_depth(3).build().is_ok());
}

#[test]
fn test_metrics_summarize_a_session() {
    let mut miner = TemplateMiner::new();
    miner.train("job alpha finished cleanly", 0);
    miner.train("job bravo finished cleanly", 0);
    miner.train("job delta finished cleanly", 0);
    miner.train("totally different event shape", 0);

    miner.find_match("job omega finished cleanly");
    miner.find_match("nothing like this trained");

    let snapshot = miner.metrics().snapshot();
    assert_eq!(snapshot.lines_trained, 4);
    assert_eq!(snapshot.clusters_created, 2);
    assert_eq!(snapshot.merge_rate(), 0.5);
    assert_eq!(snapshot.lookup_hits, 1);
    assert_eq!(snapshot.lookup_misses, 1);
    assert_eq!(snapshot.lookup_hit_rate(), 0.5);
}

#[test]
fn test_each_cluster_visits_most_recent_first() {
    let mut miner = TemplateMiner::new();
    miner.train("first shape one", 0);
    miner.train("second shape two two", 0);

    let mut templates = Vec::new();
    miner.each_cluster(|cluster| {
        templates.push(cluster.template());
        true
    });
    assert_eq!(templates[0], "second shape two two");
    assert_eq!(templates[1], "first shape one");
}
