// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::StreamItem;
use fluxion_error::FluxionError;
use fluxion_stream::{WindowByCountExt, WindowByCountOptions, WindowStream};
use fluxion_test_utils::{
    assert_stream_ended, helpers::unwrap_stream, test_channel_with_errors, unwrap_value,
};
use futures::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Drains a window to completion, collecting every value it ever emits.
async fn collect_window(window: &mut WindowStream<i32>) -> Vec<i32> {
    let mut values = Vec::new();
    while let Some(item) = window.next().await {
        match item {
            StreamItem::Value(v) => values.push(v),
            StreamItem::Error(e) => panic!("unexpected window error: {e}"),
        }
    }
    values
}

#[tokio::test]
async fn emits_contiguous_windows_and_a_short_final_one() -> anyhow::Result<()> {
    // size=3, skip=3 on [1..8] -> [[1,2,3],[4,5,6],[7,8]]
    let (tx, stream) = test_channel_with_errors::<i32>();
    let mut windows = stream.window_by_count(WindowByCountOptions::exact(3));

    for v in 1..=8 {
        tx.send(StreamItem::Value(v))?;
    }
    drop(tx);

    let mut window1 = unwrap_value(Some(unwrap_stream(&mut windows, 500).await));
    assert_eq!(collect_window(&mut window1).await, vec![1, 2, 3]);

    let mut window2 = unwrap_value(Some(unwrap_stream(&mut windows, 500).await));
    assert_eq!(collect_window(&mut window2).await, vec![4, 5, 6]);

    let mut window3 = unwrap_value(Some(unwrap_stream(&mut windows, 500).await));
    assert_eq!(collect_window(&mut window3).await, vec![7, 8]);

    assert_stream_ended(&mut windows, 200).await;
    Ok(())
}

#[tokio::test]
async fn size_one_opens_a_new_window_per_element() -> anyhow::Result<()> {
    let (tx, stream) = test_channel_with_errors::<i32>();
    let mut windows = stream.window_by_count(WindowByCountOptions::exact(1));

    for v in [10, 20, 30] {
        tx.send(StreamItem::Value(v))?;
        let mut window = unwrap_value(Some(unwrap_stream(&mut windows, 500).await));
        assert_eq!(collect_window(&mut window).await, vec![v]);
    }
    drop(tx);
    assert_stream_ended(&mut windows, 200).await;
    Ok(())
}

#[tokio::test]
async fn upstream_error_closes_open_window_then_outer() -> anyhow::Result<()> {
    // size=3, skip=3 on [1,2] followed by an upstream error
    let (tx, stream) = test_channel_with_errors::<i32>();
    let mut windows = stream.window_by_count(WindowByCountOptions::exact(3));

    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Value(2))?;
    tx.send(StreamItem::Error(FluxionError::stream_error("boom")))?;

    let mut window1 = unwrap_value(Some(unwrap_stream(&mut windows, 500).await));
    assert_eq!(window1.next().await.unwrap(), StreamItem::Value(1));
    assert_eq!(window1.next().await.unwrap(), StreamItem::Value(2));
    match window1.next().await {
        Some(StreamItem::Error(_)) => {}
        other => panic!("expected window error, got {other:?}"),
    }
    assert!(window1.next().await.is_none());

    match unwrap_stream(&mut windows, 500).await {
        StreamItem::Error(_) => {}
        StreamItem::Value(_) => panic!("expected outer error"),
    }
    assert_stream_ended(&mut windows, 200).await;
    Ok(())
}

#[tokio::test]
async fn supplier_failure_fails_outer_and_stops_upstream() -> anyhow::Result<()> {
    // A processor queue supplier that fails on the second window's buffer
    // fails outer with an error and upstream is never polled again (no
    // third window is ever observed).
    let (tx, stream) = test_channel_with_errors::<i32>();
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let options = WindowByCountOptions::<i32>::exact(2).with_processor_queue_supplier(Arc::new(
        move |capacity| {
            let n = calls_clone.fetch_add(1, Ordering::SeqCst);
            if n == 1 {
                None
            } else {
                Some(async_channel::bounded(capacity))
            }
        },
    ));
    let mut windows = stream.window_by_count(options);

    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Value(2))?; // closes window 1
    tx.send(StreamItem::Value(3))?; // opens window 2, supplier fails

    let mut window1 = unwrap_value(Some(unwrap_stream(&mut windows, 500).await));
    assert_eq!(collect_window(&mut window1).await, vec![1, 2]);

    match unwrap_stream(&mut windows, 500).await {
        StreamItem::Error(_) => {}
        StreamItem::Value(_) => panic!("expected outer error from failed supplier"),
    }
    assert_stream_ended(&mut windows, 200).await;
    Ok(())
}
