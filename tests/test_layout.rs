mod common;
use common::write_temp;
use eegraph::{ChannelLayout, Error};

#[test]
fn load_reads_positions_from_file() {
    let text = "\
index label x y
1 Fc5. -0.5466 0.2947
2 Fc3. -0.3767 0.3002
3 Cz.. 0.0 0.0
";
    let file = write_temp(text.as_bytes());
    let layout = ChannelLayout::load(file.path()).unwrap();
    assert_eq!(layout.len(), 3);
    assert_eq!(layout.get("Fc5"), Some((-0.5466, 0.2947)));
    assert_eq!(layout.get("Cz"), Some((0.0, 0.0)));
    let mut labels: Vec<&str> = layout.iter().map(|(l, _)| l).collect();
    labels.sort_unstable();
    assert_eq!(labels, vec!["Cz", "Fc3", "Fc5"]);
}

#[test]
fn malformed_row_reports_path_and_line() {
    let file = write_temp(b"index label x y\n1 Fp1 0.1 0.2\n\n3 Fp2 0.3\n");
    match ChannelLayout::load(file.path()) {
        Err(Error::LayoutParse { path, line, reason }) => {
            assert_eq!(path, file.path());
            assert_eq!(line, 4);
            assert!(reason.contains("4 fields"), "{reason}");
        }
        other => panic!("expected LayoutParse, got {other:?}"),
    }
}

#[test]
fn missing_file_is_layout_error() {
    let err = ChannelLayout::load("/no/such/channel_locations.txt").unwrap_err();
    assert!(matches!(err, Error::LayoutParse { line: 0, .. }), "{err}");
    assert!(err.to_string().contains("channel_locations.txt"), "{err}");
}
