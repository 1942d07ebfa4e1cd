// src/view.rs

use crate::model::Question;

/// Contrato núcleo -> presentación.
///
/// La sesión empuja aquí contenido y banderas de habilitación; la vista no
/// devuelve nada. Todas las operaciones son obligatorias: cualquier
/// comportamiento opcional del entorno (sonidos, animaciones) vive fuera de
/// este contrato, en la implementación concreta.
pub trait SessionView {
    /// Pregunta actual y su posición. `review` llega con el intento previo
    /// cuando se re-entra en una pregunta ya respondida.
    fn render_question(
        &mut self,
        question: &Question,
        index: usize,
        total: usize,
        review: Option<&ReviewState>,
    );

    /// Habilita o bloquea el avance.
    fn set_next_enabled(&mut self, enabled: bool);

    /// Texto de feedback de la respuesta recién enviada.
    fn set_feedback(&mut self, text: &str);

    /// Marca visualmente una opción. Con una respuesta fallada llega dos
    /// veces: la elección del usuario y luego la opción correcta revelada.
    fn mark_choice(&mut self, option_index: usize, is_correct: bool);

    /// Bloquea la entrada de opciones de la pregunta actual.
    fn disable_choices(&mut self);

    /// Resumen de cierre de un nivel que no es el último del catálogo.
    fn level_complete(&mut self, stars: u8, score: usize, total: usize);
}

/// Estado previo que acompaña al re-render de una pregunta ya respondida.
/// En modo revisión la entrada queda bloqueada; la respuesta registrada no
/// puede cambiarse.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewState {
    pub selected_index: Option<usize>,
    pub selected_tf: Option<bool>,
    pub correct: bool,
    pub feedback: String,
}

/// Señales hacia la capa de orquestación (cambio de pantalla), fuera del
/// contrato de vista. La sesión las deja en su buzón y el anfitrión las
/// drena con [`crate::session::LevelSession::take_signal`] tras cada
/// llamada entrante.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// Volver al selector de niveles sin abrir ninguno.
    BackToLevels,
    /// Volver al selector y abrir este nivel de inmediato. La orquestación
    /// comprueba contra `ProgressStore::unlocked` antes de abrirlo.
    PlayLevel(usize),
    /// Se acaba de terminar el último nivel definido en el catálogo.
    AllLevelsComplete,
}
