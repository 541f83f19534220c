use np_domain::turn::Turn;

/// Keep only the most recent `limit` turns, preserving order.
pub fn window(mut transcript: Vec<Turn>, limit: usize) -> Vec<Turn> {
    if transcript.len() > limit {
        let dropped = transcript.len() - limit;
        transcript.drain(..dropped);
        tracing::debug!(dropped, kept = limit, "history window applied");
    }
    transcript
}
