//! Статический каталог игры (read-only, `'static` таблицы)
//!
//! - elements: 17 стихий
//! - enemies: 4 типа врагов на стихию
//! - bosses: mid + final на стихию, плюс ultimate
//! - chapters: главы и раскладка уровней
//!
//! Каталог никогда не мутируется в runtime. Промах lookup'а → документированный fallback.

pub mod bosses;
pub mod chapters;
pub mod elements;
pub mod enemies;


pub use bosses::{boss_for, AttackPattern, BossAttack, BossTier, BossType, MovePattern, ULTIMATE_BOSS};
pub use chapters::{chapter_or_first, find_chapter, ChapterDef, LevelKind, CHAPTERS, STANDARD_LEVEL_COUNT};
pub use elements::Element;
pub use enemies::{enemies_for, EnemyBehavior, EnemyType, MovementPrimitive, ENEMY_TYPES};
