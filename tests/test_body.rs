use bytes::Bytes;

use beacon::http::body::{BodyError, BodyReader};

#[test]
fn test_body_complete_after_expected_bytes() {
    let mut reader = BodyReader::new(11);
    assert!(!reader.is_complete());
    assert_eq!(reader.remaining(), 11);

    reader.push_chunk(b"hello ").unwrap();
    assert!(!reader.is_complete());
    assert_eq!(reader.remaining(), 5);

    reader.push_chunk(b"world").unwrap();
    assert!(reader.is_complete());
    assert_eq!(reader.remaining(), 0);

    assert_eq!(reader.finish().unwrap(), Bytes::from_static(b"hello world"));
}

#[test]
fn test_empty_body_finishes_immediately() {
    let mut reader = BodyReader::new(0);

    assert!(reader.is_complete());
    assert_eq!(reader.finish().unwrap(), Bytes::new());
}

#[test]
fn test_finish_before_complete_is_an_error() {
    let mut reader = BodyReader::new(10);
    reader.push_chunk(b"short").unwrap();

    assert_eq!(
        reader.finish(),
        Err(BodyError::Incomplete {
            have: 5,
            expected: 10
        })
    );
}

#[test]
fn test_finish_twice_is_an_error() {
    let mut reader = BodyReader::new(3);
    reader.push_chunk(b"abc").unwrap();
    reader.finish().unwrap();

    assert_eq!(reader.finish(), Err(BodyError::AlreadyFinished));
}

#[test]
fn test_chunk_after_finish_is_a_late_chunk() {
    let mut reader = BodyReader::new(2);
    reader.push_chunk(b"ok").unwrap();
    reader.finish().unwrap();

    assert_eq!(reader.push_chunk(b"late"), Err(BodyError::LateChunk));
}

#[test]
fn test_fail_discards_partial_data_and_blocks_finish() {
    let mut reader = BodyReader::new(100);
    reader.push_chunk(b"partial data").unwrap();

    reader.fail();

    assert_eq!(reader.push_chunk(b"more"), Err(BodyError::LateChunk));
    assert_eq!(reader.finish(), Err(BodyError::Failed));
}

#[test]
fn test_binary_chunks_survive_unchanged() {
    let mut reader = BodyReader::new(4);
    reader.push_chunk(&[0x00, 0x01]).unwrap();
    reader.push_chunk(&[0x02, 0x03]).unwrap();

    assert_eq!(reader.finish().unwrap(), Bytes::from(vec![0, 1, 2, 3]));
}
