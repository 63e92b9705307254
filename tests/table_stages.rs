use std::sync::{Arc, Mutex};

use planetary_wkt::PipelineError;
use planetary_wkt::ingestion::{
    CompositeObserver, DatumStage, Diagnostic, DiagnosticKind, EllipsoidStage, MemoryObserver,
    PipelineObserver, SkipReason, StageContext, StageStats, UnsupportedFeature,
    load_table_from_reader, table_reader_builder, tokenize,
};
use planetary_wkt::types::IdentityKey;

#[derive(Default)]
struct RecordingObserver {
    finished: Mutex<Vec<(&'static str, StageStats)>>,
}

impl PipelineObserver for RecordingObserver {
    fn on_diagnostic(&self, _diagnostic: &Diagnostic) {}

    fn on_stage_finished(&self, ctx: &StageContext, stats: StageStats) {
        self.finished.lock().unwrap().push((ctx.table, stats));
    }
}

fn context(table: &'static str) -> StageContext {
    StageContext { table, path: None }
}

#[test]
fn quoted_name_in_column_three_is_one_field() {
    let fields = tokenize(r#"IAU,2015,49900,"Mars 2000, planetodetic",49900,Ellipsoidal,East"#).unwrap();
    assert_eq!(fields.len(), 7);
    assert_eq!(fields[3], "Mars 2000, planetodetic");
    assert_eq!(fields[4], "49900");
}

#[test]
fn quoted_name_survives_the_csv_reader() {
    let data = "authority,version,code,name,a,b,c,ivf\nIAU,2015,6500,\"Mars, 2000\",3396190,,,169.8944\n";
    let mut rdr = table_reader_builder().from_reader(data.as_bytes());
    let observer = MemoryObserver::new();
    let (table, stats) = load_table_from_reader(&EllipsoidStage, &mut rdr, &context("ellipsoid"), &observer).unwrap();

    assert_eq!(stats.created, 1);
    let mars = table.lookup(&IdentityKey::new("IAU", "2015", "6500")).unwrap();
    assert_eq!(mars.name(), "Mars, 2000");
    assert_eq!(mars.inverse_flattening(), 169.8944);
}

#[test]
fn unterminated_quote_aborts_the_table() {
    let data = "authority,version,code,name,a,b,c,ivf\nIAU,2015,6500,\"Mars 2000,3396190,,,169.8944\n";
    let mut rdr = table_reader_builder().from_reader(data.as_bytes());
    let err = load_table_from_reader(&EllipsoidStage, &mut rdr, &context("ellipsoid"), &MemoryObserver::new())
        .unwrap_err();
    assert!(matches!(err, PipelineError::Tokenize { table: "ellipsoid", line: 2, .. }));
    assert!(err.to_string().starts_with("ellipsoid line 2: unterminated quoted field"));
}

#[test]
fn observers_fan_out_diagnostics_and_stage_stats() {
    let memory = Arc::new(MemoryObserver::new());
    let recording = Arc::new(RecordingObserver::default());
    let observer = CompositeObserver::new(vec![memory.clone() as Arc<dyn PipelineObserver>, recording.clone()]);

    let ellipsoids = "authority,version,code,name,a,b,c,ivf\n\
                      IAU,2015,30100,Moon,1737400,,1737400,\n\
                      IAU,2015,40100,Phobos,13000,11400,9100,\n";
    let mut rdr = table_reader_builder().from_reader(ellipsoids.as_bytes());
    let (ellipsoids, _) = load_table_from_reader(&EllipsoidStage, &mut rdr, &context("ellipsoid"), &observer).unwrap();

    let datums = "authority,version,code,name,body,ellipsoid,pm,pmValue\n\
                  IAU,2015,30100,D_Moon,Moon,30100,,\n\
                  IAU,2015,40100,D_Phobos,Phobos,40100,,\n\
                  IAU,2015,30100,D_Moon again,Moon,30100,,\n";
    let mut rdr = table_reader_builder().from_reader(datums.as_bytes());
    let (datums, stats) =
        load_table_from_reader(&DatumStage::new(&ellipsoids), &mut rdr, &context("datum"), &observer).unwrap();

    assert_eq!(datums.len(), 1);
    assert_eq!(datums.values().next().unwrap().name(), "D_Moon");
    assert_eq!(stats.rows, 3);
    assert_eq!(stats.duplicates, 1);

    let kinds: Vec<DiagnosticKind> = memory.diagnostics().into_iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::Skipped(SkipReason::Unsupported(UnsupportedFeature::TriaxialEllipsoid)),
            DiagnosticKind::Skipped(SkipReason::UnresolvedReference(IdentityKey::new("IAU", "2015", "40100"))),
            DiagnosticKind::DuplicateKey(IdentityKey::new("IAU", "2015", "30100")),
        ]
    );

    let finished = recording.finished.lock().unwrap().clone();
    assert_eq!(finished.len(), 2);
    assert_eq!(finished[0].0, "ellipsoid");
    assert_eq!(finished[1], ("datum", stats));
}
