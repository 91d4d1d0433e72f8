use std::path::PathBuf;
use policyrag_text::KnowledgeBase;
use walkdir::WalkDir;

fn knowledge_dir() -> PathBuf {
    // crates/policyrag-text -> crates -> repo root
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf();
    root.join("test_data/knowledge")
}

#[test]
fn knowledge_full_flow() {
    let data_dir = knowledge_dir();
    let expected_txt: usize = WalkDir::new(&data_dir).max_depth(1).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()).filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt")).count();
    eprintln!("policyrag: loading {} .txt files from {}", expected_txt, data_dir.display());

    let kb = KnowledgeBase::new();
    let report = kb.load_report(&data_dir).expect("load");
    assert_eq!(report.files, expected_txt);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.chunks, expected_txt, "every fixture is shorter than one window");
    assert!(kb.is_loaded());

    for (q, source) in [("minimum attendance", "attendance_policy"), ("scholarship cgpa", "merit_scholarship"), ("timetable published", "timetable_guidelines")] {
        let hits = kb.search(q, 10);
        eprintln!("q='{}' -> {} hits", q, hits.len());
        assert_eq!(hits[0].source, source, "q={q}");
        for pair in hits.windows(2) { assert!(pair[0].score >= pair[1].score); }
    }

    let context = kb.retrieve("What is the minimum attendance requirement?", 3);
    assert!(context.starts_with("[Source: Attendance Policy]\n"));
    assert!(context.contains("75 percent"));
}
