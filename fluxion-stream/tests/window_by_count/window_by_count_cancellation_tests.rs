// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::StreamItem;
use fluxion_stream::{WindowByCountExt, WindowByCountOptions};
use fluxion_test_utils::{
    error_injection::{CountingDropStream, DropCounter},
    helpers::unwrap_stream,
    test_channel_with_errors,
};
use std::time::Duration;

#[tokio::test]
async fn dropping_outer_before_any_window_opens_cancels_upstream_once() -> anyhow::Result<()> {
    let (_tx, stream) = test_channel_with_errors::<i32>();
    let counter = DropCounter::new();
    let counted_stream = CountingDropStream::new(stream, counter.clone());
    let windows = counted_stream.window_by_count(WindowByCountOptions::exact(3));

    assert_eq!(counter.count(), 0);
    drop(windows);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(counter.count(), 1);
    Ok(())
}

#[tokio::test]
async fn an_open_window_keeps_upstream_alive_after_outer_drops() -> anyhow::Result<()> {
    // Exact strategy: the outer handle drops, but the currently open window
    // is still held by its subscriber, so upstream must not be cancelled yet.
    let (tx, stream) = test_channel_with_errors::<i32>();
    let counter = DropCounter::new();
    let counted_stream = CountingDropStream::new(stream, counter.clone());
    let mut windows = counted_stream.window_by_count(WindowByCountOptions::exact(3));

    tx.send(StreamItem::Value(1))?;
    let window = match unwrap_stream(&mut windows, 500).await {
        StreamItem::Value(w) => w,
        StreamItem::Error(e) => panic!("expected window, got error: {e}"),
    };

    drop(windows); // outer releases its baseline unit
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(
        counter.count(),
        0,
        "the still-open window keeps upstream alive"
    );

    drop(window); // the last unit releases
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(counter.count(), 1, "upstream cancelled exactly once");
    Ok(())
}

#[tokio::test]
async fn upstream_completion_cancels_nothing_further() -> anyhow::Result<()> {
    // Natural completion and outer cancellation are mutually exclusive ends
    // of the same lifetime; once upstream completes the task exits without
    // ever invoking an extra cancel of its own (there is nothing left to
    // cancel).
    let (tx, stream) = test_channel_with_errors::<i32>();
    let counter = DropCounter::new();
    let counted_stream = CountingDropStream::new(stream, counter.clone());
    let mut windows = counted_stream.window_by_count(WindowByCountOptions::exact(2));

    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Value(2))?;
    drop(tx);

    let _window = unwrap_stream(&mut windows, 500).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(counter.count(), 1, "upstream dropped exactly once on completion");
    Ok(())
}
