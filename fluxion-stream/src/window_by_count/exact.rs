// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Exact strategy: `skip == size`, contiguous non-overlapping windows.

use crate::window_by_count::common::{
    any_cancelled, close_window, duplicate_error, fail_window, open_window, route_value,
};
use crate::window_by_count::lifetime::{ActiveLifetime, ReleaseGuard};
use crate::window_by_count::options::WindowByCountOptions;
use crate::window_by_count::window_stream::WindowStream;
use async_channel::Sender;
use fluxion_core::{CancellationToken, StreamItem};
use futures::{future, Stream, StreamExt};

/// Drives the exact-windows loop: reads `upstream` to completion (or until
/// cancelled by a dropped `active` count), emitting a new [`WindowStream`]
/// every `size` elements and routing elements into the currently open one.
///
/// On a terminal upstream signal, the currently open window is closed first
/// and only then is the outer subscriber notified, in that order.
pub(crate) async fn run<S, T>(
    mut upstream: S,
    outer: Sender<StreamItem<WindowStream<T>>>,
    options: WindowByCountOptions<T>,
    lifetime: ActiveLifetime,
    task_cancel: CancellationToken,
) where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: Send + Sync + Unpin + 'static,
{
    let size = options.size;
    let mut current: Option<(Sender<StreamItem<T>>, ReleaseGuard)> = None;
    let mut index: usize = 0;
    let lifetime_cancel = lifetime.cancel_token();

    loop {
        let next =
            future::select(upstream.next(), any_cancelled(&lifetime_cancel, &task_cancel)).await;
        let item = match next {
            future::Either::Left((item, _)) => item,
            future::Either::Right(_) => break,
        };

        match item {
            Some(StreamItem::Value(value)) => {
                if index == 0 {
                    match open_window(&options, &lifetime) {
                        Ok((sender, window, guard)) => {
                            if outer.send(StreamItem::Value(window)).await.is_err() {
                                // Outer is gone for good; this window can never be
                                // observed, so it closes right away instead of
                                // artificially keeping upstream alive for it. Any
                                // window already open keeps running until `active`
                                // drains on its own.
                                close_window(sender, guard);
                            } else {
                                current = Some((sender, guard));
                            }
                        }
                        Err(error) => {
                            let _ = outer.send(StreamItem::Error(error)).await;
                            break;
                        }
                    }
                }

                if let Some((sender, _)) = &current {
                    route_value(sender, value).await;
                }

                index += 1;
                if index == size {
                    if let Some((sender, guard)) = current.take() {
                        close_window(sender, guard);
                    }
                    index = 0;
                }
            }
            Some(StreamItem::Error(error)) => {
                if let Some((sender, guard)) = current.take() {
                    fail_window(sender, guard, duplicate_error(&error)).await;
                }
                let _ = outer.send(StreamItem::Error(error)).await;
                break;
            }
            None => {
                if let Some((sender, guard)) = current.take() {
                    close_window(sender, guard);
                }
                break;
            }
        }
    }
}
