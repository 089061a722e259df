use std::fs;
use std::sync::Arc;
use std::thread;

use esli::assessment::{
    AssessmentRecord, AssessmentRepository, AssessmentService, AssessmentSubmission,
    CsvUnmappedLog, ReferenceStore, RepositoryError, SchoolLevel, UnmappedQuestionLog,
};
use esli::assessment::{AssessmentId, ResponseValue};
use std::collections::HashMap;
use std::sync::Mutex;

const STANDARDS: &str = "\
level,category,mean,std
중등,자기성취,60,10
중등,사회적 관계,60,10
중등,직접적 보상처벌,60,10
중등,목표세우기,75,10
";

const PERCENTILES: &str = "\
t_score,percentile
100,50
128,97
";

const QUESTIONS: &str = "\
pattern,category,match
공부하며 성장하는 내 모습이 자랑스러워서,자기성취,exact
어떤 일을 하기 전에 항상 목표세워 시작한다,목표세우기,exact
목표,목표세우기,keyword
";

#[derive(Default)]
struct Records(Mutex<HashMap<AssessmentId, AssessmentRecord>>);

impl AssessmentRepository for Records {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        self.0
            .lock()
            .expect("lock")
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(self.0.lock().expect("lock").get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Ok(self
            .0
            .lock()
            .expect("lock")
            .values()
            .take(limit)
            .cloned()
            .collect())
    }
}

fn submission(name: &str, items: &[(&str, i64)]) -> AssessmentSubmission {
    AssessmentSubmission {
        student_name: name.to_string(),
        school_level: Some(SchoolLevel::Middle),
        responses: items
            .iter()
            .map(|(question, value)| (*question, ResponseValue::new(*value).expect("valid")))
            .collect(),
    }
}

#[test]
fn csv_reference_data_drives_scoring_and_audit() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("standards.csv"), STANDARDS).expect("standards");
    fs::write(dir.path().join("percentiles.csv"), PERCENTILES).expect("percentiles");
    fs::write(dir.path().join("question_map.csv"), QUESTIONS).expect("questions");
    let audit_path = dir.path().join("unmapped.csv");

    let audit: Arc<dyn UnmappedQuestionLog> = Arc::new(CsvUnmappedLog::new(&audit_path));
    let service = Arc::new(
        AssessmentService::new(
            Arc::new(ReferenceStore::from_dir(dir.path())),
            Arc::new(Records::default()),
            SchoolLevel::Elementary,
        )
        .with_audit(audit.clone()),
    );

    let record = service
        .submit(submission(
            "김민준",
            &[
                ("공부하며 성장하는 내 모습이 자랑스러워서", 4),
                ("어떤 일을 하기 전에 항상 목표세워 시작한다", 4),
                ("공부할 때는 학습 목표를 꼭 확인한다", 4),
                ("공부할 때는 학습 목표를 꼭 확인한다 ", 3),
                ("학교 수업시간에 자는 경우가 많다", 2),
            ],
        ))
        .expect("submitted");

    let report = &record.report;
    // 100 raw vs mean 60 / std 10 → T = 160
    assert_eq!(
        report.classification.motivation.kind.label(),
        "자기 주도적 학습형"
    );
    // both goal questions plus the keyword hit average to (4 + 4 + 3) / 3 * 25
    let goal = report
        .scores
        .get(esli::assessment::Category::GoalSetting)
        .expect("goal setting");
    assert!((goal.raw_score - 91.666_666).abs() < 1e-3);
    assert_eq!(report.unmapped_questions, vec!["학교 수업시간에 자는 경우가 많다"]);

    let entries = audit.entries().expect("audit entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].occurrence_count, 1);
    assert!(audit_path.exists());
}

#[test]
fn concurrent_submissions_share_one_snapshot() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("standards.csv"), STANDARDS).expect("standards");
    fs::write(dir.path().join("percentiles.csv"), PERCENTILES).expect("percentiles");

    let audit = Arc::new(CsvUnmappedLog::new(dir.path().join("unmapped.csv")));
    let service = Arc::new(
        AssessmentService::new(
            Arc::new(ReferenceStore::from_dir(dir.path())),
            Arc::new(Records::default()),
            SchoolLevel::Middle,
        )
        .with_audit(audit.clone()),
    );

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for round in 0..5 {
                    let name = format!("학생{worker}-{round}");
                    service
                        .submit(submission(&name, &[("아무 키워드도 없는 문항", 2)]))
                        .expect("submitted");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker finished");
    }

    assert_eq!(service.recent(100).expect("recent").len(), 40);
    let entries = audit.entries().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].occurrence_count, 40);
}
