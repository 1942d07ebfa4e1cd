use super::*;

/// Estrellas según la fracción de aciertos.
pub(crate) fn stars_for_ratio(ratio: f64) -> u8 {
    if ratio >= 0.8 {
        3
    } else if ratio >= 0.6 {
        2
    } else if ratio >= 0.4 {
        1
    } else {
        0
    }
}

impl<'a, V: SessionView> LevelSession<'a, V> {
    /// Cierre del nivel: calcula estrellas, consolida el progreso y avisa.
    ///
    /// Con el último nivel del catálogo la señal es `AllLevelsComplete` en
    /// lugar del resumen ordinario. El contador de desbloqueo sube igual,
    /// aunque el nivel siguiente no exista.
    pub(crate) fn finish_level(&mut self) {
        let ratio = if self.total > 0 {
            self.score as f64 / self.total as f64
        } else {
            0.0
        };
        let stars = stars_for_ratio(ratio);

        // Nunca se regresa un mejor resultado anterior
        let best = self.progress.stars_for(self.level);
        self.progress.set_stars(self.level, stars.max(best));
        self.progress.unlock_next(self.level);
        self.state = SessionState::Complete;

        if self.level >= self.catalog.total_levels() {
            self.signal = Some(SessionSignal::AllLevelsComplete);
        } else {
            // El resumen muestra lo recién conseguido, no el mejor histórico
            self.view.level_complete(stars, self.score, self.total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::stars_for_ratio;

    #[test]
    fn thresholds_at_exact_boundaries() {
        assert_eq!(stars_for_ratio(1.0), 3);
        assert_eq!(stars_for_ratio(0.8), 3);
        assert_eq!(stars_for_ratio(0.79999), 2);
        assert_eq!(stars_for_ratio(0.6), 2);
        assert_eq!(stars_for_ratio(0.59999), 1);
        assert_eq!(stars_for_ratio(0.4), 1);
        assert_eq!(stars_for_ratio(0.39999), 0);
        assert_eq!(stars_for_ratio(0.0), 0);
    }

    #[test]
    fn four_of_five_is_exactly_three_stars() {
        // 4/5 debe caer en el umbral 0.8 sin sorpresas de coma flotante
        assert_eq!(stars_for_ratio(4.0 / 5.0), 3);
        assert_eq!(stars_for_ratio(3.0 / 5.0), 2);
        assert_eq!(stars_for_ratio(2.0 / 5.0), 1);
    }
}
