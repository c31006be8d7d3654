use std::{cell::RefCell, rc::Rc};

use render_tutorial::{
    manager::SceneHost,
    scene::{self, Frame, Scene},
};

type Log = Rc<RefCell<Vec<String>>>;

struct Recorder {
    name: &'static str,
    log: Log,
}

impl Recorder {
    fn boxed(name: &'static str, log: &Log) -> anyhow::Result<Box<dyn Scene>> {
        log.borrow_mut().push(format!("construct {name}"));
        Ok(Box::new(Recorder {
            name,
            log: log.clone(),
        }))
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.log.borrow_mut().push(format!("drop {}", self.name));
    }
}

impl Scene for Recorder {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn render(&mut self, _frame: &mut Frame<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

#[test]
fn replacement_should_construct_before_dropping_the_previous_scene() {
    let log = Log::default();
    let mut host = SceneHost::new("Tutorial");

    host.replace_with(0, || Recorder::boxed("first", &log)).unwrap();
    host.replace_with(3, || Recorder::boxed("second", &log)).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["construct first", "construct second", "drop first"]
    );
    assert_eq!(host.active(), Some(3));
    assert_eq!(host.current().map(|s| s.name()), Some("second".to_string()));
}

#[test]
fn failed_construction_should_keep_the_running_scene() {
    let log = Log::default();
    let mut host = SceneHost::new("Tutorial");
    host.replace_with(1, || Recorder::boxed("stable", &log)).unwrap();

    let result = host.replace_with(2, || anyhow::bail!("missing asset"));

    assert!(result.is_err());
    assert_eq!(*log.borrow(), vec!["construct stable"]);
    assert_eq!(host.active(), Some(1));
    assert_eq!(host.window_title(), "Tutorial - stable");
}

#[test]
fn title_should_name_the_active_scene() {
    let log = Log::default();
    let mut host = SceneHost::new("Tutorial");
    assert_eq!(host.window_title(), "Tutorial");
    host.replace_with(0, || Recorder::boxed("Clear", &log)).unwrap();
    assert_eq!(host.window_title(), "Tutorial - Clear");
}

#[test]
fn dropping_the_host_should_drop_its_scene() {
    let log = Log::default();
    {
        let mut host = SceneHost::new("Tutorial");
        host.replace_with(0, || Recorder::boxed("only", &log)).unwrap();
    }
    assert_eq!(*log.borrow(), vec!["construct only", "drop only"]);
}

#[test]
fn catalogue_should_start_with_clear_and_use_unique_names() {
    let scenes = scene::catalogue();
    assert_eq!(scenes.len(), 12);
    assert_eq!(scenes[0].name, "Clear");

    let mut names: Vec<&str> = scenes.iter().map(|s| s.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), scenes.len());
}

#[test]
fn find_should_ignore_case() {
    let scenes = scene::catalogue();
    assert_eq!(scene::find(&scenes, "multiplelight"), Some(11));
    assert_eq!(scene::find(&scenes, "BasicLight"), Some(8));
    assert_eq!(scene::find(&scenes, "Teapot"), None);
}
