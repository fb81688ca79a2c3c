use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use coursekit::{
    slides::{self, Configure, ConfigureError, SlidesEnv, MAKEFILE, SLIDES_FILENAME},
    util::{file_timestamp, set_file_timestamp},
};
use uuid::Uuid;

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("coursekit-slides-{}", Uuid::new_v4()));
    fs::create_dir_all(root.join("lessons")).expect("create temp root");
    root
}

fn add_lesson(root: &Path, name: &str) -> PathBuf {
    let dir = root.join("lessons").join(name);
    fs::create_dir_all(&dir).expect("create lesson");
    fs::write(dir.join("content.tex"), "\\begin{frame}\\end{frame}\n").expect("write content");
    dir
}

fn slides_of(dir: &Path) -> String {
    fs::read_to_string(dir.join(SLIDES_FILENAME)).expect("read slides")
}

#[test]
fn lessons_are_discovered_by_number() {
    let root = temp_root();
    add_lesson(&root, "10");
    add_lesson(&root, "2");
    fs::create_dir_all(root.join("lessons").join("drafts")).expect("create garbage");

    let mut configure = Configure::new(&root, false).expect("configure");
    configure.autodiscover_lessons().expect("discover");
    let numbers: Vec<_> = configure.lessons().keys().copied().collect();
    assert_eq!(numbers, vec![2, 10]);

    let makefile = configure.makefile();
    assert!(makefile.contains("slides: lesson-slides-02 lesson-slides-10\n"));
    assert!(makefile.contains("lesson-slides-02: lessons/2/slides.tex lessons/2/content.tex"));
    assert!(makefile.find("lesson-slides-02:") < makefile.find("lesson-slides-10:"));
    assert!(makefile.ends_with(".coursekit.json:\n\tcoursekit configure\n"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn lesson_without_content_is_incomplete() {
    let root = temp_root();
    add_lesson(&root, "1");
    fs::create_dir_all(root.join("lessons").join("3")).expect("create lesson");

    let err = slides::configure(&root, false, SlidesEnv::default()).expect_err("incomplete");
    match err {
        ConfigureError::Incomplete { lesson, missing } => {
            assert_eq!(lesson, "3");
            assert_eq!(missing, "content.tex");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!root.join(MAKEFILE).exists());

    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_lesson_directory_is_an_error() {
    let root = std::env::temp_dir().join(format!("coursekit-slides-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");

    let err = slides::configure(&root, false, SlidesEnv::default()).expect_err("no lessons");
    assert!(matches!(err, ConfigureError::Unknown(_)));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn configure_writes_slides_and_makefile_with_one_timestamp() {
    let root = temp_root();
    let first = add_lesson(&root, "1");
    let second = add_lesson(&root, "4");

    slides::configure(&root, false, SlidesEnv::default()).expect("configure");

    let makefile_time = file_timestamp(&root.join(MAKEFILE)).expect("makefile time");
    for dir in [&first, &second] {
        assert_eq!(file_timestamp(&dir.join(SLIDES_FILENAME)).expect("slides time"), makefile_time);
    }
    assert!(slides_of(&second).contains("\\newcommand{\\lessonno}{4}"));
    assert!(slides_of(&second).contains("\\newcommand{\\lessonnoo}{04}"));
    assert!(slides_of(&second).contains("\\input{content.tex}"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn edited_slides_survive_unless_forced() {
    let root = temp_root();
    let lesson = add_lesson(&root, "5");
    slides::configure(&root, false, SlidesEnv::default()).expect("configure");

    fs::write(lesson.join(SLIDES_FILENAME), "% edited by hand\n").expect("edit slides");
    let future = SystemTime::now() + Duration::from_secs(3600);
    set_file_timestamp(&lesson.join(SLIDES_FILENAME), future).expect("touch slides");

    slides::configure(&root, false, SlidesEnv::default()).expect("reconfigure");
    assert_eq!(slides_of(&lesson), "% edited by hand\n");

    slides::configure(&root, true, SlidesEnv::default()).expect("forced reconfigure");
    assert!(slides_of(&lesson).contains("\\newcommand{\\lessonno}{5}"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn author_is_remembered_and_rendered() {
    let root = temp_root();
    let lesson = add_lesson(&root, "7");
    let overrides = SlidesEnv {
        author: Some("Ada Lovelace".into()),
        ..SlidesEnv::default()
    };

    slides::configure(&root, false, overrides).expect("configure");
    assert!(SlidesEnv::path(&root).is_file());
    assert!(slides_of(&lesson).contains("\\newcommand{\\lessonauthor}{Ada Lovelace}"));

    slides::configure(&root, false, SlidesEnv::default()).expect("reconfigure");
    let env = SlidesEnv::load(&root).expect("load env");
    assert_eq!(env.author.as_deref(), Some("Ada Lovelace"));
    assert_eq!(env.contact, None);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn changed_author_regenerates_fresh_slides() {
    let root = temp_root();
    let lesson = add_lesson(&root, "8");
    slides::configure(&root, false, SlidesEnv::default()).expect("configure");

    let future = SystemTime::now() + Duration::from_secs(3600);
    set_file_timestamp(&lesson.join(SLIDES_FILENAME), future).expect("touch slides");

    let overrides = SlidesEnv {
        contact: Some("ada@example.org".into()),
        ..SlidesEnv::default()
    };
    slides::configure(&root, false, overrides).expect("reconfigure");
    assert!(slides_of(&lesson).contains("\\newcommand{\\lessoncontact}{ada@example.org}"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn env_merge_reports_changes() {
    let mut env = SlidesEnv {
        author: Some("Ada".into()),
        ..SlidesEnv::default()
    };

    assert!(!env.merge(SlidesEnv::default()));
    assert!(!env.merge(SlidesEnv {
        author: Some("Ada".into()),
        ..SlidesEnv::default()
    }));
    assert!(env.merge(SlidesEnv {
        title_extra: Some("Winter term".into()),
        ..SlidesEnv::default()
    }));
    assert_eq!(env.author.as_deref(), Some("Ada"));
    assert_eq!(env.title_extra.as_deref(), Some("Winter term"));
}
