use super::*;

impl<'a, V: SessionView> LevelSession<'a, V> {
    /// Retrocede una pregunta y la re-renderiza, en modo revisión si ya fue
    /// respondida. En el índice 0 no hace nada.
    pub fn navigate_previous(&mut self) {
        if let SessionState::Active(index) = self.state {
            if index > 0 {
                self.state = SessionState::Active(index - 1);
                self.render_current();
            }
        }
    }

    /// Avanza a la siguiente pregunta; desde la última dispara el cierre del
    /// nivel. Tras el cierre la sesión es terminal y llamadas posteriores no
    /// hacen nada: el cierre ocurre exactamente una vez por sesión.
    pub fn navigate_next(&mut self) {
        match self.state {
            SessionState::Active(index) if index + 1 < self.total => {
                self.state = SessionState::Active(index + 1);
                self.render_current();
            }
            SessionState::Active(_) => self.finish_level(),
            SessionState::Complete => {}
        }
    }

    /// Abandona el nivel y vuelve al selector. No toca el progreso: lo ya
    /// confirmado por cierres anteriores se queda como está.
    pub fn quit(&mut self) {
        self.signal = Some(SessionSignal::BackToLevels);
    }

    /// Botón "Next Level" de la pantalla de cierre: pide al selector abrir
    /// el nivel siguiente. El selector decide si está desbloqueado.
    pub fn next_level(&mut self) {
        self.signal = Some(SessionSignal::PlayLevel(self.level + 1));
    }
}
