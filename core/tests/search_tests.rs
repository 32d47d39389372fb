use hashdex_core::{rank, DocScore, IndexConfig, SearchEngine, SearchError, StopWords, Strategy};

fn cat_engine(strategy: Strategy) -> SearchEngine {
    SearchEngine::new(
        IndexConfig::with_strategy(strategy),
        StopWords::empty(strategy),
        vec![("A", "cat sat mat"), ("B", "cat cat dog")],
    )
}

#[test]
fn more_frequent_term_ranks_first() {
    for strategy in Strategy::ALL {
        let hits = cat_engine(strategy).search("cat").unwrap();
        let names: Vec<&str> = hits.iter().map(|h| h.document.as_str()).collect();
        assert_eq!(names, vec!["B", "A"], "{strategy}");
        assert!((hits[0].score - (1.0 + 2f64.ln()) / 3.0).abs() < 1e-12);
        assert!((hits[1].score - 1.0 / 3.0).abs() < 1e-12);
    }
}

#[test]
fn unseen_term_is_unknown() {
    let err = cat_engine(Strategy::LinearProbing).search("cat unicorn").unwrap_err();
    assert!(matches!(err, SearchError::UnknownTerm(ref t) if t == "unicorn"));
}

#[test]
fn empty_corpus_knows_no_terms() {
    for strategy in Strategy::ALL {
        let engine = SearchEngine::new(IndexConfig::with_strategy(strategy), StopWords::default(), Vec::<(String, String)>::new());
        assert!(matches!(engine.search("anything"), Err(SearchError::UnknownTerm(_))));
        assert_eq!(engine.stats().documents, 0);
    }
}

#[test]
fn equal_scores_keep_index_order() {
    let engine = SearchEngine::new(
        IndexConfig::default(),
        StopWords::default(),
        vec![("zeta.txt", "cat dog"), ("alpha.txt", "dog cat"), ("mid.txt", "cat bird")],
    );
    let first = engine.search("cat").unwrap();
    let names: Vec<&str> = first.iter().map(|h| h.document.as_str()).collect();
    assert_eq!(names, vec!["zeta.txt", "alpha.txt", "mid.txt"]);
    assert_eq!(engine.search("cat").unwrap(), first);
}

#[test]
fn stopwords_do_not_count_towards_length() {
    let sw = StopWords::parse(Strategy::QuadraticProbing, "the a");
    let engine = SearchEngine::new(
        IndexConfig::with_strategy(Strategy::QuadraticProbing),
        sw,
        vec![("short.txt", "the the the cat"), ("long.txt", "cat dog bird")],
    );
    let hits = engine.search("the cat").unwrap();
    assert_eq!(hits[0].document, "short.txt");
    assert!((hits[0].score - 1.0).abs() < 1e-12);
}

#[test]
fn rank_is_deterministic() {
    let scores = vec![DocScore::new("x", 0.2), DocScore::new("y", 0.2), DocScore::new("z", 0.4)];
    assert_eq!(rank(scores.clone()), rank(scores));
}

#[test]
fn large_corpus_all_strategies_agree() {
    let docs: Vec<(String, String)> = (0..60)
        .map(|i| (format!("doc{i:02}.txt"), format!("common term{} term{} filler{}", i % 7, i % 5, i)))
        .collect();
    let results: Vec<Vec<DocScore>> = Strategy::ALL
        .iter()
        .map(|&s| SearchEngine::new(IndexConfig::with_strategy(s), StopWords::default(), docs.clone()).search("common term3").unwrap())
        .collect();
    assert_eq!(results[0].len(), 60);
    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
}
