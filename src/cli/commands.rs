//! Command implementations for the kbsearch CLI.

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::{DocumentUpdate, NewDocument};
use crate::error::{KbSearchError, Result};
use crate::ingest::ingest_file;
use crate::search::{SearchConfig, SearchEngine, ranking};
use crate::service::KnowledgeBaseService;
use crate::storage::{DocumentStore, JsonFileStore};
use crate::usage::FileUsageLog;

/// Execute a CLI command.
pub fn execute_command(args: KbSearchArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search(search_args, &args),
        Command::Analyze(analyze_args) => analyze(analyze_args, &args),
        Command::List => list_documents(&args),
        Command::Add(add_args) => add_document(add_args.clone(), &args),
        Command::Update(update_args) => update_document(update_args.clone(), &args),
        Command::Delete(delete_args) => delete_document(delete_args, &args),
        Command::Upload(upload_args) => upload_document(upload_args, &args),
        Command::Unanswered => list_unanswered(&args),
        Command::Feedback(feedback_args) => record_feedback(feedback_args, &args),
    }
}

/// Build the ranking configuration from the preset and an optional overrides file.
fn load_config(ranking: &RankingArgs) -> Result<SearchConfig> {
    match &ranking.config {
        Some(path) => {
            debug!(
                "Loading {} overrides from {}",
                ranking.preset,
                path.display()
            );
            SearchConfig::from_json_file(ranking.preset, path)
        }
        None => Ok(ranking.preset.config()),
    }
}

fn open_store(args: &KbSearchArgs) -> Result<JsonFileStore> {
    JsonFileStore::open(&args.knowledge_base)
}

fn open_usage_log(args: &KbSearchArgs) -> Result<FileUsageLog> {
    FileUsageLog::open(&args.logs)
}

/// Search the knowledge base.
fn search(search_args: &SearchArgs, args: &KbSearchArgs) -> Result<()> {
    let config = load_config(&search_args.ranking)?;
    let service =
        KnowledgeBaseService::with_config(open_store(args)?, open_usage_log(args)?, config);

    let response = service.search(&search_args.query, search_args.agent.as_deref())?;
    output_result("Search completed", &response, args)
}

/// Show how a query is normalized.
fn analyze(analyze_args: &AnalyzeArgs, args: &KbSearchArgs) -> Result<()> {
    let config = load_config(&analyze_args.ranking)?;
    let engine = SearchEngine::new(config);
    let terms = engine.terms(&analyze_args.query);

    let result = AnalysisResult {
        query: analyze_args.query.clone(),
        preset: analyze_args.ranking.preset.to_string(),
        required_matches: ranking::required_matches(terms.len(), engine.config()),
        terms,
    };
    output_result("Query analyzed", &result, args)
}

fn list_documents(args: &KbSearchArgs) -> Result<()> {
    let documents = open_store(args)?.snapshot()?;
    let result = DocumentList {
        total: documents.len(),
        documents: documents.to_vec(),
    };
    output_result("Documents", &result, args)
}

fn add_document(add_args: AddArgs, args: &KbSearchArgs) -> Result<()> {
    if add_args.title.trim().is_empty() {
        return Err(KbSearchError::invalid_argument("title must not be empty"));
    }

    let document = open_store(args)?.create(NewDocument {
        title: add_args.title,
        content: add_args.content,
        keywords: add_args.keywords,
        category: add_args.category,
        source: add_args.source,
        section: add_args.section,
    })?;
    output_result("Document added", &document, args)
}

fn update_document(update_args: UpdateArgs, args: &KbSearchArgs) -> Result<()> {
    let update = DocumentUpdate {
        title: update_args.title,
        content: update_args.content,
        keywords: update_args.keywords,
        category: update_args.category,
        source: update_args.source,
        section: update_args.section,
    };
    if update.is_empty() {
        return Err(KbSearchError::invalid_argument(
            "nothing to update; pass at least one field",
        ));
    }

    let document = open_store(args)?.update(update_args.id, update)?;
    output_result("Document updated", &document, args)
}

fn delete_document(delete_args: &DeleteArgs, args: &KbSearchArgs) -> Result<()> {
    let deleted = open_store(args)?.delete(delete_args.id)?;
    let result = DeletionResult {
        id: delete_args.id,
        deleted,
    };
    output_result("Document deleted", &result, args)
}

fn upload_document(upload_args: &UploadArgs, args: &KbSearchArgs) -> Result<()> {
    let new_document = ingest_file(&upload_args.file)?;
    let document = open_store(args)?.create(new_document)?;
    info!(
        "Uploaded {} as document {}",
        upload_args.file.display(),
        document.id
    );
    output_result("Document uploaded", &document, args)
}

fn list_unanswered(args: &KbSearchArgs) -> Result<()> {
    let service = KnowledgeBaseService::new(open_store(args)?, open_usage_log(args)?);
    let questions = service.unanswered()?;
    output_result("Unanswered questions", &UnansweredReport { questions }, args)
}

fn record_feedback(feedback_args: &FeedbackArgs, args: &KbSearchArgs) -> Result<()> {
    let service = KnowledgeBaseService::new(open_store(args)?, open_usage_log(args)?);
    let helpful = feedback_args.helpful && !feedback_args.not_helpful;
    let entry = service.feedback(
        feedback_args.result_id,
        helpful,
        feedback_args.agent.as_deref(),
    )?;
    output_result("Feedback recorded", &entry, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::UsageLog;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(dir: &TempDir, rest: &[&str]) -> KbSearchArgs {
        let kb = dir.path().join("kb.json");
        let logs = dir.path().join("logs");
        let mut argv = vec![
            "kbsearch".to_string(),
            "-q".to_string(),
            "--format".to_string(),
            "json".to_string(),
            "--kb".to_string(),
            kb.to_string_lossy().to_string(),
            "--logs".to_string(),
            logs.to_string_lossy().to_string(),
        ];
        argv.extend(rest.iter().map(|s| s.to_string()));
        KbSearchArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_add_then_search_records_logs() {
        let dir = TempDir::new().unwrap();

        execute_command(parse(
            &dir,
            &[
                "add",
                "--title",
                "Refund Policy",
                "--content",
                "Customers may request a refund within 30 days.",
                "-k",
                "refund,policy",
            ],
        ))
        .unwrap();
        execute_command(parse(&dir, &["search", "refund policy"])).unwrap();
        execute_command(parse(&dir, &["search", "teleportation"])).unwrap();

        let log = FileUsageLog::open(dir.path().join("logs")).unwrap();
        assert_eq!(log.searches().unwrap().len(), 2);
        assert_eq!(log.unanswered().unwrap()[0].question, "teleportation");
    }

    #[test]
    fn test_update_requires_a_field() {
        let dir = TempDir::new().unwrap();
        let err = execute_command(parse(&dir, &["update", "1"])).unwrap_err();
        assert!(matches!(err, KbSearchError::InvalidArgument(_)));
    }

    #[test]
    fn test_update_missing_document() {
        let dir = TempDir::new().unwrap();
        let err = execute_command(parse(&dir, &["update", "1", "--title", "x"])).unwrap_err();
        assert!(matches!(err, KbSearchError::NotFound(_)));
    }

    #[test]
    fn test_bad_config_file() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("ranking.json");
        std::fs::write(&config, r#"{"maxResults": 0}"#).unwrap();

        let err = execute_command(parse(
            &dir,
            &["search", "refund", "--config", config.to_str().unwrap()],
        ))
        .unwrap_err();
        assert!(matches!(err, KbSearchError::Config(_)));
    }
}
