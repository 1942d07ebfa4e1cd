// src/view_models.rs

use crate::levels::LevelCatalog;
use crate::progress::{MAX_STARS, ProgressStore};

/// Fila del selector de niveles: todo lo que un botón necesita pintar,
/// sin tocar píxeles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelInfo {
    pub number: usize,
    pub unlocked: bool,
    pub stars: u8,
}

impl LevelInfo {
    pub fn label(&self) -> String {
        if self.unlocked {
            format!("Level {}  {}", self.number, stars_text(self.stars))
        } else {
            format!("Level {} 🔒", self.number)
        }
    }
}

/// "★★☆" para 2 de 3.
pub fn stars_text(stars: u8) -> String {
    let stars = stars.min(MAX_STARS) as usize;
    "★".repeat(stars) + &"☆".repeat(MAX_STARS as usize - stars)
}

/// Deriva las filas del selector a partir del catálogo y el progreso.
pub fn level_infos(catalog: &LevelCatalog, progress: &ProgressStore) -> Vec<LevelInfo> {
    catalog
        .level_numbers()
        .into_iter()
        .map(|number| LevelInfo {
            number,
            unlocked: number <= progress.unlocked(),
            stars: progress.stars_for(number),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn infos_follow_unlock_and_stars() {
        let dir = tempfile::tempdir().unwrap();
        let mut progress = ProgressStore::load(dir.path().join("progress.json"));
        progress.set_stars(1, 2);
        progress.unlock_next(1); // unlocked = 2

        let catalog = LevelCatalog::from_levels(BTreeMap::from([
            (1, vec!["q1".to_owned()]),
            (2, vec!["q2".to_owned()]),
            (3, vec!["q3".to_owned()]),
        ]));

        let infos = level_infos(&catalog, &progress);
        assert_eq!(
            infos,
            vec![
                LevelInfo {
                    number: 1,
                    unlocked: true,
                    stars: 2
                },
                LevelInfo {
                    number: 2,
                    unlocked: true,
                    stars: 0
                },
                LevelInfo {
                    number: 3,
                    unlocked: false,
                    stars: 0
                },
            ]
        );
    }

    #[test]
    fn labels_show_stars_or_lock() {
        let open = LevelInfo {
            number: 1,
            unlocked: true,
            stars: 2,
        };
        assert_eq!(open.label(), "Level 1  ★★☆");

        let locked = LevelInfo {
            number: 4,
            unlocked: false,
            stars: 0,
        };
        assert_eq!(locked.label(), "Level 4 🔒");
    }
}
