//! Uncompressed, unencrypted transfers.

use checksums::strong::Md5;
use protocol::ControlMessage;
use test_support::{ScriptedTransport, incompressible, temp_file_with};
use transfer::{
    DEFAULT_CHUNK_SIZE, TransferConfig, TransferMode, TransferPipeline, WHOLE_FILE_READ_SIZE,
};

fn whole_file() -> TransferPipeline {
    let config = TransferConfig::builder()
        .mode(TransferMode::WholeFile)
        .data_path("t/etc/hosts")
        .build()
        .unwrap();
    TransferPipeline::new(config)
}

#[test]
fn files_go_out_in_small_reads() {
    let data = incompressible(10_000, 31);
    let file = temp_file_with(&data).unwrap();
    let mut transport = ScriptedTransport::new();
    let outcome = whole_file().send_file(&mut transport, file.path()).unwrap();

    let sizes: Vec<usize> = transport
        .sent()
        .iter()
        .filter(|f| f.command == protocol::Command::Append)
        .map(|f| f.payload.len())
        .collect();
    assert_eq!(sizes, [WHOLE_FILE_READ_SIZE, WHOLE_FILE_READ_SIZE, 10_000 - 2 * WHOLE_FILE_READ_SIZE]);
    assert_eq!(transport.appended(), data);
    assert_eq!(transport.polls(), 3);

    let record = transport.end_file().unwrap();
    assert_eq!(record.bytes(), 10_000);
    assert_eq!(record.digest_bytes(), &Md5::digest(&data));
    assert_eq!(outcome.completed().unwrap().record(), record);
}

#[test]
fn metadata_goes_out_in_chunk_slices_without_polling() {
    let data = incompressible(70_000, 32);
    let mut transport = ScriptedTransport::new()
        .with_message(ControlMessage::Interrupt("t/etc/hosts".into()));
    let outcome = whole_file()
        .send_metadata(&mut transport, &data, "t/etc/hosts")
        .unwrap();

    let sizes: Vec<usize> = transport.sent().iter().map(|f| f.payload.len()).collect();
    assert_eq!(
        &sizes[..3],
        &[DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_SIZE, 70_000 - 2 * DEFAULT_CHUNK_SIZE]
    );
    assert_eq!(transport.polls(), 0);
    assert_eq!(transport.pending(), 1);
    assert_eq!(outcome.bytes_transferred(), 70_000);
    assert_eq!(transport.end_file().unwrap().digest_bytes(), &Md5::digest(&data));
}

#[test]
fn empty_file_sends_only_the_record() {
    let file = temp_file_with(&[]).unwrap();
    let mut transport = ScriptedTransport::new();
    whole_file().send_file(&mut transport, file.path()).unwrap();
    assert_eq!(transport.append_count(), 0);
    assert_eq!(
        transport.end_file().unwrap().to_string(),
        "0:d41d8cd98f00b204e9800998ecf8427e"
    );
}
