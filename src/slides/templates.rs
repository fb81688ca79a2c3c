#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::slides::env::SlidesEnv;

/// Header of the generated Makefile.
pub const MAKEFILE_HEADER: &str = "\
LATEX=pdflatex -halt-on-error
COMMON_DEPS=.coursekit.json
SLIDES_COMMON_DEPS=common/slides-*.tex

default: slides
";

/// Footer of the generated Makefile; recreates the environment file, and with
/// it the Makefile, when it is missing.
pub const MAKEFILE_FOOTER: &str = "\
.coursekit.json:
\tcoursekit configure
";

/// Makefile rule building the slides of one lesson.
///
/// * `lesson_no`: number of the lesson
/// * `rel_path`: lesson directory relative to the Makefile
pub fn lesson_slides_target(lesson_no: u32, rel_path: &str) -> String {
    format!(
        "lesson-slides-{lesson_no:02}: {rel_path}/slides.tex {rel_path}/content.tex \
         ${{SLIDES_COMMON_DEPS}} ${{COMMON_DEPS}}\n\
         \tcd {rel_path}; $(LATEX) slides.tex && $(LATEX) slides.tex\n"
    )
}

/// Makefile rule building the slides of every lesson.
pub fn slides_target(lessons: impl IntoIterator<Item = u32>) -> String {
    let targets = lessons
        .into_iter()
        .map(|no| format!("lesson-slides-{no:02}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("slides: {targets}\n")
}

/// Scaffold `slides.tex` of one lesson, wrapping its `content.tex`.
pub fn slides_file(lesson_no: u32, env: &SlidesEnv) -> String {
    format!(
        r"
\input{{../../common/slides-head.tex}}

\newcommand{{\lessonno}}{{{lesson_no}}}
\newcommand{{\lessonnoo}}{{{lesson_no:02}}}
\newcommand{{\lessonauthor}}{{{author}}}
\newcommand{{\lessoncontact}}{{{contact}}}
\newcommand{{\lessontitleextra}}{{{title_extra}}}

\input{{../../common/slides-conf.tex}}
\input{{content.tex}}
\input{{../../common/slides-foot.tex}}
",
        author = env.author.as_deref().unwrap_or_default(),
        contact = env.contact.as_deref().unwrap_or_default(),
        title_extra = env.title_extra.as_deref().unwrap_or_default(),
    )
}
