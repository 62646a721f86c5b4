// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 DriveGauge Contributors

//! Pagination properties against scripted page sources

use drivegauge_drive::{classify, mock::MockDrive, Entry, InventoryCounts, RemoteLister};
use std::sync::Arc;

fn numbered(n: usize) -> Vec<Entry> {
    (0..n)
        .map(|i| {
            if i % 4 == 0 {
                Entry::folder(format!("id-{i}"), format!("folder {i}"))
            } else {
                Entry::file(format!("id-{i}"), format!("file {i}"))
            }
        })
        .collect()
}

/// Three pages of 10, 10 and 4 entries yield all 24 in order
#[tokio::test]
async fn test_three_pages_accumulate_in_order() {
    let entries = numbered(24);
    let drive = MockDrive::paged(entries.clone(), 10);
    let lister = RemoteLister::new(Arc::new(drive.clone()));

    let snapshot = lister.list_all().await.unwrap();

    assert_eq!(snapshot.entries(), entries.as_slice());
    assert_eq!(snapshot.pages(), 3);
    assert_eq!(drive.requests(), 3);
}

/// A failing middle page yields no snapshot at all
#[tokio::test]
async fn test_intermediate_failure_discards_listing() {
    let drive = MockDrive::paged(numbered(24), 10);
    drive.fail_at(Some(1)).await;
    let lister = RemoteLister::new(Arc::new(drive.clone()));

    let err = lister.list_all().await.unwrap_err();
    assert_eq!(err.kind(), "backend");
    // Stops at the failing page
    assert_eq!(drive.requests(), 2);
}

#[tokio::test]
async fn test_first_page_failure() {
    let drive = MockDrive::paged(numbered(5), 10);
    drive.fail_at(Some(0)).await;
    assert!(RemoteLister::new(Arc::new(drive)).list_all().await.is_err());
}

#[tokio::test]
async fn test_empty_drive_is_one_empty_page() {
    let drive = MockDrive::new();
    let snapshot = RemoteLister::new(Arc::new(drive.clone()))
        .list_all()
        .await
        .unwrap();

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.pages(), 1);
    assert_eq!(classify(snapshot.entries()), InventoryCounts::default());
}

/// Each listing is a full re-enumeration of the current script
#[tokio::test]
async fn test_relisting_sees_new_script() {
    let drive = MockDrive::paged(numbered(3), 10);
    let lister = RemoteLister::new(Arc::new(drive.clone()));
    assert_eq!(lister.list_all().await.unwrap().len(), 3);

    drive.set_pages(vec![numbered(12)]).await;
    let snapshot = lister.list_all().await.unwrap();
    let counts = classify(snapshot.entries());
    assert_eq!(counts.total(), 12);
    assert_eq!(counts.directories, 3);
}

#[tokio::test]
async fn test_many_small_pages() {
    let entries = numbered(101);
    let drive = MockDrive::paged(entries.clone(), 1);
    let snapshot = RemoteLister::new(Arc::new(drive)).list_all().await.unwrap();
    assert_eq!(snapshot.pages(), 101);
    assert_eq!(snapshot.entries(), entries.as_slice());
}
