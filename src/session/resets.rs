use super::*;

impl<'a, V: SessionView> LevelSession<'a, V> {
    /// Reinicia el nivel en curso: índice, score y todos los intentos vuelven
    /// a su estado inicial, y se pide a la orquestación reabrir este mismo
    /// nivel desde cero.
    pub fn retry(&mut self) {
        self.state = if self.total == 0 {
            SessionState::Complete
        } else {
            SessionState::Active(0)
        };
        self.score = 0;
        for st in self.attempts.values_mut() {
            st.reset();
        }
        self.signal = Some(SessionSignal::PlayLevel(self.level));
    }
}
