#[cfg(test)]
mod tests {
    use kbsearch::document::Document;
    use kbsearch::search::{
        DocumentScorer, Preset, QueryPlan, RankOrder, SearchConfig, SearchEngine, search,
    };

    fn refund_policy() -> Document {
        Document::builder()
            .id(1)
            .title("Refund Policy")
            .content("Customers may request a refund within 30 days.")
            .keywords(["refund", "policy"])
            .category("billing")
            .build()
    }

    fn knowledge_base() -> Vec<Document> {
        vec![
            refund_policy(),
            Document::builder()
                .id(2)
                .title("Password Reset")
                .content("Use the reset link on the sign-in page to change your password.")
                .keywords(["password", "login"])
                .category("account")
                .build(),
            Document::builder()
                .id(3)
                .title("Shipping Times")
                .content("Standard shipping takes five business days. Express shipping takes two.")
                .keywords(["shipping", "delivery"])
                .category("orders")
                .build(),
            Document::builder()
                .id(4)
                .title("Store Hours")
                .content("Stores open at nine and close at six.")
                .category("general")
                .build(),
        ]
    }

    #[test]
    fn test_refund_policy_scenario() {
        let results = search("refund policy", &[refund_policy()], &SearchConfig::lenient());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_words, 2);
        assert_eq!(results[0].match_ratio, 1.0);
        assert_eq!(results[0].score, 173.0);
    }

    #[test]
    fn test_degenerate_inputs_return_nothing() {
        let documents = knowledge_base();
        for preset in [Preset::Lenient, Preset::Strict, Preset::Minimal] {
            let engine = SearchEngine::with_preset(preset);
            assert!(engine.search("", &documents).is_empty());
            assert!(engine.search("   ", &documents).is_empty());
            assert!(engine.search("the and or", &documents).is_empty());
            assert!(engine.search("!! 42 ??", &documents).is_empty());
            assert!(engine.search("anything", &[]).is_empty());
        }
    }

    #[test]
    fn test_natural_language_question() {
        let engine = SearchEngine::default();
        assert_eq!(
            engine.terms("How do I reset my password?"),
            vec!["how", "reset"]
        );

        let results = engine.search("How do I reset my password", &knowledge_base());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.id, 2);
        assert_eq!(results[0].matched_words, 2);
    }

    #[test]
    fn test_strict_drops_question_words() {
        let engine = SearchEngine::with_preset(Preset::Strict);
        assert_eq!(
            engine.terms("How do I reset my password"),
            vec!["reset", "password"]
        );

        let results = engine.search("How do I reset my password", &knowledge_base());
        assert_eq!(results[0].document.id, 2);
    }

    #[test]
    fn test_phrase_hit_is_always_included() {
        let mut documents = knowledge_base();
        documents.push(
            Document::builder()
                .id(5)
                .title("Guide")
                .content("Read this before you start a password reset request.")
                .build(),
        );

        for preset in [Preset::Lenient, Preset::Strict, Preset::Minimal] {
            let results = SearchEngine::with_preset(preset).search("password reset", &documents);
            let hit = results
                .iter()
                .find(|r| r.document.id == 5)
                .unwrap_or_else(|| panic!("phrase document missing under {preset}"));
            assert_eq!(hit.matched_words, 2, "{preset}");
        }
    }

    #[test]
    fn test_result_count_is_capped() {
        let documents: Vec<Document> = (0..12)
            .map(|i| {
                Document::builder()
                    .id(i)
                    .title(format!("Refund case {i}"))
                    .content("refund")
                    .build()
            })
            .collect();

        for preset in [Preset::Lenient, Preset::Strict, Preset::Minimal] {
            let results = SearchEngine::with_preset(preset).search("refund", &documents);
            assert_eq!(results.len(), 5, "{preset}");
        }

        let mut config = SearchConfig::lenient();
        config.max_results = 3;
        assert_eq!(search("refund", &documents, &config).len(), 3);
    }

    #[test]
    fn test_close_scores_prefer_coverage() {
        let full_coverage = Document::builder()
            .id(10)
            .title("Overview")
            .content("Our policy covers refund and shipping questions.")
            .build();
        let partial = Document::builder()
            .id(11)
            .title("Misc")
            .content("Shipping note.")
            .keywords(["refund"])
            .build();

        let results = search(
            "refund shipping policy",
            &[partial.clone(), full_coverage.clone()],
            &SearchConfig::lenient(),
        );

        assert_eq!(results.len(), 2);
        // 15 vs 20: within the tolerance, so three matched terms beat two
        assert_eq!(results[0].document.id, 10);
        assert_eq!(results[0].score, 15.0);
        assert_eq!(results[1].document.id, 11);
        assert_eq!(results[1].score, 20.0);
    }

    #[test]
    fn test_distant_scores_prefer_score() {
        let full_coverage = Document::builder()
            .id(10)
            .title("Overview")
            .content("Our policy covers refund and shipping questions.")
            .build();
        let partial = Document::builder()
            .id(11)
            .title("Misc")
            .content("Shipping note.")
            .keywords(["refund", "shipping"])
            .build();

        let results = search(
            "refund shipping policy",
            &[full_coverage, partial],
            &SearchConfig::lenient(),
        );

        assert_eq!(results[0].document.id, 11);
        assert_eq!(results[0].score, 33.0);
        assert_eq!(results[1].document.id, 10);
    }

    #[test]
    fn test_rank_order_invariants() {
        let documents: Vec<Document> = (0..40)
            .map(|i| {
                let content = "refund ".repeat(i % 6) + if i % 3 == 0 { "shipping" } else { "" };
                let mut builder = Document::builder()
                    .id(i as u64)
                    .title(if i % 4 == 0 { "Refund notes" } else { "Notes" })
                    .content(content);
                if i % 5 == 0 {
                    builder = builder.keyword("policy");
                }
                builder.build()
            })
            .collect();

        let query = "refund shipping policy";

        let mut lenient = SearchConfig::lenient();
        lenient.max_results = 40;
        let results = search(query, &documents, &lenient);
        assert!(!results.is_empty());
        for (i, earlier) in results.iter().enumerate() {
            for later in &results[i + 1..] {
                assert!(later.score <= earlier.score + lenient.score_tie_tolerance);
            }
        }

        let mut strict = SearchConfig::strict();
        strict.max_results = 40;
        assert_eq!(strict.rank_order, RankOrder::CoverageThenScore);
        let results = search(query, &documents, &strict);
        for pair in results.windows(2) {
            assert!(pair[0].matched_words >= pair[1].matched_words);
            if pair[0].matched_words == pair[1].matched_words {
                assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let documents = knowledge_base();
        for preset in [Preset::Lenient, Preset::Strict, Preset::Minimal] {
            let engine = SearchEngine::with_preset(preset);
            let first = engine.search("shipping delivery times", &documents);
            let second = engine.search("shipping delivery times", &documents);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_extra_occurrences_never_lower_the_score() {
        let config = SearchConfig::lenient();
        let scorer = DocumentScorer::new(&config);
        let plan = QueryPlan::new(vec!["refund".to_string(), "window".to_string()], &config);

        let mut previous = 0.0;
        for occurrences in 1..=8 {
            let document = Document::builder()
                .title("Refund")
                .content(format!("{} window", "refund ".repeat(occurrences)))
                .build();
            let score = scorer.score(&plan, &document).score;
            assert!(score >= previous, "{occurrences}: {score} < {previous}");
            previous = score;
        }
    }

    #[test]
    fn test_exact_occurrence_keeps_fuzzy_match_included() {
        let config = SearchConfig::lenient();
        let plan = QueryPlan::new(vec!["invoices".to_string(), "refund".to_string()], &config);
        let scorer = DocumentScorer::new(&config);

        let mut previous = 0.0;
        for content in [
            "your invoice and refund",
            "your invoice and refund invoices",
            "your invoice and refund invoices invoices",
        ] {
            let document = Document::builder().id(1).content(content).build();
            let score = scorer.score(&plan, &document).score;
            assert!(score >= previous, "{content:?}: {score} < {previous}");
            previous = score;

            let results = search("invoices refund", &[document], &config);
            assert_eq!(results.len(), 1, "{content:?}");
        }
    }

    #[test]
    fn test_minimal_preset_accepts_any_term() {
        let results = SearchEngine::with_preset(Preset::Minimal)
            .search("refund shipping", &knowledge_base());

        let ids: Vec<u64> = results.iter().map(|r| r.document.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&1));
        assert!(ids.contains(&3));
        assert!(results.iter().all(|r| r.matched_words == 1));
    }

    #[test]
    fn test_documents_without_keywords() {
        let documents: Vec<Document> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "Gift Cards", "content": "Gift cards never expire.", "keywords": null},
                {"id": 2, "title": "Coupons", "content": "Coupons expire after a month."}
            ]"#,
        )
        .unwrap();

        let results = search("gift cards", &documents, &SearchConfig::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.id, 1);
    }
}
