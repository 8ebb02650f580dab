use {
    crate::{
        config::MeasureConfig,
        error::MeasureError,
        session::{Frame, FrameResult, ImageStream, StreamSession},
    },
    futures_core::Stream,
    futures_sink::Sink,
    std::{
        collections::VecDeque,
        fmt,
        pin::Pin,
        task::{Context, Poll, Waker},
    },
};

/// Measures a sequence of frames from one camera.
///
/// Implements `Sink<Frame>` to accept model output and
/// `Stream<Item = Result<FrameResult>>` to produce one result per frame, in
/// order. A failed frame yields an `Err` item and the stream continues.
/// Closing the sink ends the stream once every pending frame is processed.
pub struct MeasureStream {
    session: StreamSession,
    pending: VecDeque<Frame>,
    closed: bool,
    stream_waker: Option<Waker>,
}

impl fmt::Debug for MeasureStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureStream")
            .field("stream", &self.session.stream())
            .field("pending", &self.pending.len())
            .field("closed", &self.closed)
            .finish()
    }
}

impl MeasureStream {
    pub fn new(stream: ImageStream, config: &MeasureConfig) -> Self {
        Self::from_session(StreamSession::new(stream, config))
    }

    pub fn from_session(session: StreamSession) -> Self {
        Self {
            session,
            pending: VecDeque::new(),
            closed: false,
            stream_waker: None,
        }
    }

    pub fn session(&self) -> &StreamSession {
        &self.session
    }

    pub fn into_session(self) -> StreamSession {
        self.session
    }

    fn wake(&mut self) {
        if let Some(waker) = self.stream_waker.take() {
            waker.wake();
        }
    }
}

impl Sink<Frame> for MeasureStream {
    type Error = MeasureError;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), MeasureError>> {
        Poll::Ready(Ok(()))
    }

    fn start_send(self: Pin<&mut Self>, item: Frame) -> Result<(), MeasureError> {
        let this = self.get_mut();
        this.pending.push_back(item);
        this.wake();
        Ok(())
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), MeasureError>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), MeasureError>> {
        let this = self.get_mut();
        this.closed = true;
        this.wake();
        Poll::Ready(Ok(()))
    }
}

impl Stream for MeasureStream {
    type Item = Result<FrameResult, MeasureError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(frame) = this.pending.pop_front() {
            return Poll::Ready(Some(this.session.process_frame(frame)));
        }

        if this.closed {
            return Poll::Ready(None);
        }

        this.stream_waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

fn _assert_send() {
    fn assert<T: Send>() {}
    assert::<MeasureStream>();
}
