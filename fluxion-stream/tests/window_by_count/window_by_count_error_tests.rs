// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::StreamItem;
use fluxion_error::FluxionError;
use fluxion_stream::{WindowByCountExt, WindowByCountOptions};
use fluxion_test_utils::{assert_stream_ended, helpers::unwrap_stream, test_channel_with_errors};
use futures::StreamExt;

#[test]
#[should_panic(expected = "size must be at least 1")]
fn zero_size_is_a_programmer_error() {
    let _ = WindowByCountOptions::<i32>::new(0, 1);
}

#[test]
#[should_panic(expected = "skip must be at least 1")]
fn zero_skip_is_a_programmer_error() {
    let _ = WindowByCountOptions::<i32>::new(1, 0);
}

#[tokio::test]
async fn upstream_error_reaches_every_currently_open_overlap_window() -> anyhow::Result<()> {
    let (tx, stream) = test_channel_with_errors::<i32>();
    let mut windows = stream.window_by_count(WindowByCountOptions::overlap(3, 1));

    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Value(2))?;
    tx.send(StreamItem::Error(FluxionError::stream_error("upstream boom")))?;

    let mut window1 = match unwrap_stream(&mut windows, 500).await {
        StreamItem::Value(w) => w,
        StreamItem::Error(e) => panic!("expected first window, got error: {e}"),
    };
    let mut window2 = match unwrap_stream(&mut windows, 500).await {
        StreamItem::Value(w) => w,
        StreamItem::Error(e) => panic!("expected second window, got error: {e}"),
    };

    // Both windows were still open (size 3, only 2 elements routed so far)
    // and each must see the upstream error after its already-routed values.
    assert_eq!(window1.next().await.unwrap(), StreamItem::Value(1));
    assert_eq!(window1.next().await.unwrap(), StreamItem::Value(2));
    assert!(matches!(window1.next().await, Some(StreamItem::Error(_))));
    assert!(window1.next().await.is_none());

    assert_eq!(window2.next().await.unwrap(), StreamItem::Value(2));
    assert!(matches!(window2.next().await, Some(StreamItem::Error(_))));
    assert!(window2.next().await.is_none());

    assert!(matches!(
        unwrap_stream(&mut windows, 500).await,
        StreamItem::Error(_)
    ));
    assert_stream_ended(&mut windows, 200).await;
    Ok(())
}

#[tokio::test]
async fn skip_strategy_forwards_error_to_the_only_open_window() -> anyhow::Result<()> {
    let (tx, stream) = test_channel_with_errors::<i32>();
    let mut windows = stream.window_by_count(WindowByCountOptions::skip(2, 4));

    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(FluxionError::stream_error("boom")))?;

    let mut window1 = match unwrap_stream(&mut windows, 500).await {
        StreamItem::Value(w) => w,
        StreamItem::Error(e) => panic!("expected window, got error: {e}"),
    };
    assert_eq!(window1.next().await.unwrap(), StreamItem::Value(1));
    assert!(matches!(window1.next().await, Some(StreamItem::Error(_))));

    assert!(matches!(
        unwrap_stream(&mut windows, 500).await,
        StreamItem::Error(_)
    ));
    assert_stream_ended(&mut windows, 200).await;
    Ok(())
}

#[tokio::test]
async fn upstream_error_with_no_open_window_still_reaches_outer() -> anyhow::Result<()> {
    // Error arrives exactly on a stride boundary, before any window has
    // opened for the next stride: only outer sees it, no window does.
    let (tx, stream) = test_channel_with_errors::<i32>();
    let mut windows = stream.window_by_count(WindowByCountOptions::exact(2));

    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Value(2))?; // closes window 1, index resets to 0
    tx.send(StreamItem::Error(FluxionError::stream_error("boom")))?;

    let mut window1 = match unwrap_stream(&mut windows, 500).await {
        StreamItem::Value(w) => w,
        StreamItem::Error(e) => panic!("expected window, got error: {e}"),
    };
    assert_eq!(window1.next().await.unwrap(), StreamItem::Value(1));
    assert_eq!(window1.next().await.unwrap(), StreamItem::Value(2));
    assert!(window1.next().await.is_none());

    assert!(matches!(
        unwrap_stream(&mut windows, 500).await,
        StreamItem::Error(_)
    ));
    assert_stream_ended(&mut windows, 200).await;
    Ok(())
}
