use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use inbox_app::prefs::FilePreferenceStore;
use inbox_core::NotificationInbox;

fn open_inbox(path: &std::path::Path) -> NotificationInbox {
    NotificationInbox::builder()
        .with_preference_store(Box::new(FilePreferenceStore::new(path)))
        .build()
        .expect("build inbox")
}

#[test]
fn notifications_survive_a_process_restart() {
    let temp = tempdir().expect("tempdir");
    let prefs_path = temp.path().join("inbox/prefs.json");
    let received = Utc.with_ymd_and_hms(2024, 5, 2, 8, 15, 0).unwrap();

    {
        let inbox = open_inbox(&prefs_path);
        inbox.add_payload_at(
            r#"{"version": 1, "timestampEvent": "2024-05-02 08:00:41"}"#,
            received,
        );
        inbox.add_payload_at(
            r#"{"version": 1, "timestampEvent": "2024-05-02 08:10:05"}"#,
            received,
        );
        inbox.mark_read(1).expect("mark read");
        assert_eq!(inbox.unread_count(), 1);
    }

    // A fresh inbox over the same file plays the role of the next launch.
    let reopened = open_inbox(&prefs_path);
    assert_eq!(reopened.count(), 2);
    assert_eq!(reopened.unread_count(), 1);
    assert!(!reopened.get(0).expect("first").read);
    assert!(reopened.get(1).expect("second").read);
    assert_eq!(reopened.get(0).expect("first").received, received);
}

#[test]
fn an_empty_file_location_starts_an_empty_inbox() {
    let temp = tempdir().expect("tempdir");
    let inbox = open_inbox(&temp.path().join("never-written.json"));
    assert_eq!(inbox.count(), 0);
    assert_eq!(inbox.unread_count(), 0);
}
