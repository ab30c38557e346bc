mod common;

use common::{FakeApi, Step, repos, states, test_config};
use migrator_core::{BatchMode, MigrationId, MigrationOptions, MigrationState};
use migrator_engine::{Anomaly, ExportError, run_export};

#[tokio::test]
async fn test_combined_export_downloads_single_archive() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new().with_job(states(&["pending", "exporting", "exported"]));
    let config = test_config(BatchMode::Combined, dir.path());

    let report = run_export(&api, &repos(&["a", "b"]), &config).await.unwrap();

    assert_eq!(api.launches(), vec![repos(&["a", "b"])]);
    assert_eq!(api.polls_of(1), 3);
    assert_eq!(api.downloads(), vec![MigrationId(1)]);

    assert_eq!(report.migrations, 1);
    assert_eq!(report.rounds, 3);
    assert!(report.is_clean());
    assert_eq!(report.archives.len(), 1);

    let path = dir.path().join("migration-archive-1.tar.gz");
    assert_eq!(report.archives[0].path, path);
    assert_eq!(std::fs::read_to_string(path).unwrap(), "archive-1");
}

#[tokio::test]
async fn test_per_repository_export_skips_failed_migration() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new()
        .with_job(states(&["exporting", "exported"]))
        .with_job(states(&["exporting", "failed"]));
    let config = test_config(BatchMode::PerRepository, dir.path());

    let report = run_export(&api, &repos(&["a", "b"]), &config).await.unwrap();

    assert_eq!(api.launches(), vec![repos(&["a"]), repos(&["b"])]);
    assert_eq!(api.downloads(), vec![MigrationId(1)]);

    assert_eq!(report.archives.len(), 1);
    assert_eq!(report.archives[0].id, MigrationId(1));
    assert_eq!(report.anomalies.len(), 1);
    match &report.anomalies[0] {
        Anomaly::Unsuccessful {
            id,
            state,
            repositories,
        } => {
            assert_eq!(*id, MigrationId(2));
            assert_eq!(*state, MigrationState::Failed);
            assert_eq!(repositories.repositories(), repos(&["b"]).as_slice());
        }
        other => panic!("unexpected anomaly: {other:?}"),
    }

    assert!(dir.path().join("migration-archive-1.tar.gz").exists());
    assert!(!dir.path().join("migration-archive-2.tar.gz").exists());
}

#[tokio::test]
async fn test_options_are_sent_with_every_migration() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new();
    let options = MigrationOptions {
        lock_repositories: true,
        exclude_git_data: true,
        ..Default::default()
    };
    let mut config = test_config(BatchMode::PerRepository, dir.path());
    config.options = options;

    run_export(&api, &repos(&["a", "b", "c"]), &config)
        .await
        .unwrap();

    let requests = api.launch_requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|req| req.options == options));
}

#[tokio::test]
async fn test_archive_base_name_in_combined_mode() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new();
    let config = test_config(BatchMode::Combined, dir.path()).with_archive_name("foo");

    let report = run_export(&api, &repos(&["a", "b"]), &config).await.unwrap();

    assert_eq!(report.archives[0].path, dir.path().join("foo.tar.gz"));
    assert!(dir.path().join("foo.tar.gz").exists());
}

#[tokio::test]
async fn test_archive_base_name_in_per_repository_mode() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new();
    let config = test_config(BatchMode::PerRepository, dir.path()).with_archive_name("foo");

    let report = run_export(&api, &repos(&["a", "b"]), &config).await.unwrap();

    let paths: Vec<_> = report.archives.iter().map(|a| a.path.clone()).collect();
    assert_eq!(
        paths,
        vec![dir.path().join("foo-1.tar.gz"), dir.path().join("foo-2.tar.gz")]
    );
}

#[tokio::test]
async fn test_launch_failure_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new().fail_launch(1);
    let config = test_config(BatchMode::PerRepository, dir.path());

    let err = run_export(&api, &repos(&["a", "b", "c"]), &config)
        .await
        .unwrap_err();

    match err {
        ExportError::Launch { batch, source } => {
            assert_eq!(batch.repositories(), repos(&["b"]).as_slice());
            assert!(source.is_client_error());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(api.launches().len(), 2);
    assert!(api.polls().is_empty());
    assert!(api.downloads().is_empty());
}

#[tokio::test]
async fn test_poll_failure_is_fatal_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new().with_job(vec![Step::State("pending"), Step::Error(502)]);
    let config = test_config(BatchMode::Combined, dir.path());

    let err = run_export(&api, &repos(&["a"]), &config).await.unwrap_err();

    assert!(matches!(err, ExportError::Poll { id: MigrationId(1), .. }));
    assert_eq!(api.polls_of(1), 2);
    assert!(api.downloads().is_empty());
}

#[tokio::test]
async fn test_download_failure_does_not_stop_other_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new().fail_download(1);
    let config = test_config(BatchMode::PerRepository, dir.path());

    let report = run_export(&api, &repos(&["a", "b"]), &config).await.unwrap();

    assert_eq!(api.downloads(), vec![MigrationId(1), MigrationId(2)]);
    assert_eq!(report.archives.len(), 1);
    assert_eq!(report.archives[0].id, MigrationId(2));
    assert!(matches!(
        report.anomalies.as_slice(),
        [Anomaly::DownloadFailed { id: MigrationId(1), .. }]
    ));
}

#[tokio::test]
async fn test_empty_repository_list_is_rejected_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new();
    let config = test_config(BatchMode::Combined, dir.path());

    let err = run_export(&api, &[], &config).await.unwrap_err();

    assert!(matches!(err, ExportError::InvalidConfig(_)));
    assert!(api.launches().is_empty());
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new();
    let config = test_config(BatchMode::Combined, dir.path()).with_max_poll_rounds(0);

    let err = run_export(&api, &repos(&["a"]), &config).await.unwrap_err();

    assert!(matches!(err, ExportError::InvalidConfig(_)));
    assert!(api.launches().is_empty());
}

#[tokio::test]
async fn test_output_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("exports").join("octo-org");
    let api = FakeApi::new();
    let config = test_config(BatchMode::Combined, &nested);

    run_export(&api, &repos(&["a"]), &config).await.unwrap();

    assert!(nested.join("migration-archive-1.tar.gz").exists());
}
