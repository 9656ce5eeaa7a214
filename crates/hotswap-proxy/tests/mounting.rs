use hotswap_object::{ObjectHandle, Value};
use hotswap_proxy::{PrototypeProxy, DEFAULT_MOUNT_HOOK, DEFAULT_UNMOUNT_HOOK};
use hotswap_test_utils::{
    call_log, counter, init_tracing, static_property, with_lifecycle, ShallowRenderer,
};
use proptest::prelude::*;

fn mount(instance: &ObjectHandle) {
    instance.call_method(DEFAULT_MOUNT_HOOK, &[]).unwrap();
}

fn unmount(instance: &ObjectHandle) {
    instance.call_method(DEFAULT_UNMOUNT_HOOK, &[]).unwrap();
}

#[test]
fn mount_and_unmount_are_tracked() {
    init_tracing();
    let proxy = PrototypeProxy::from_definition(&counter("v1")).unwrap();
    let mounted = proxy.mounted_instances();
    let instance = proxy.instantiate();
    assert!(mounted.is_empty());

    mount(&instance);
    assert_eq!(mounted.len(), 1);
    assert!(mounted.instances()[0].ptr_eq(&instance));

    unmount(&instance);
    assert!(mounted.is_empty());
}

#[test]
fn instances_are_kept_in_mount_order() {
    let proxy = PrototypeProxy::from_definition(&counter("v1")).unwrap();
    let instances: Vec<_> = (0..3).map(|_| proxy.instantiate()).collect();
    for instance in &instances {
        mount(instance);
    }

    unmount(&instances[1]);

    let ids: Vec<_> = proxy.mounted_instances().ids();
    assert_eq!(ids, vec![instances[0].id(), instances[2].id()]);
}

#[test]
fn tracking_survives_updates() {
    let proxy = PrototypeProxy::from_definition(&counter("v1")).unwrap();
    let a = proxy.instantiate();
    let b = proxy.instantiate();
    mount(&a);

    proxy.update(&counter("v2")).unwrap();
    mount(&b);
    proxy.update(&static_property(1)).unwrap();

    let mounted = proxy.mounted_instances();
    assert_eq!(mounted.len(), 2);
    assert!(mounted.contains(&a) && mounted.contains(&b));

    unmount(&a);
    assert_eq!(mounted.ids(), vec![b.id()]);
}

#[test]
fn definition_hooks_still_run() {
    let log = call_log();
    let proxy = PrototypeProxy::from_definition(&with_lifecycle("v1", &log)).unwrap();
    let instance = proxy.instantiate();

    mount(&instance);
    proxy.update(&with_lifecycle("v2", &log)).unwrap();
    unmount(&instance);

    assert_eq!(*log.lock(), vec!["v1:mount", "v2:unmount"]);
    assert!(proxy.mounted_instances().is_empty());
}

#[test]
fn hooks_are_tracked_even_without_definition_hooks() {
    let log = call_log();
    let proxy = PrototypeProxy::from_definition(&with_lifecycle("v1", &log)).unwrap();
    let instance = proxy.instantiate();

    proxy.update(&counter("v2")).unwrap();
    assert_eq!(instance.call_method(DEFAULT_MOUNT_HOOK, &[]).unwrap(), Value::Undefined);

    assert!(log.lock().is_empty());
    assert_eq!(proxy.mounted_instances().len(), 1);
}

#[test]
fn unmounting_unknown_instance_is_harmless() {
    let proxy = PrototypeProxy::from_definition(&counter("v1")).unwrap();
    let mounted_one = proxy.instantiate();
    mount(&mounted_one);

    unmount(&proxy.instantiate());

    assert_eq!(proxy.mounted_instances().len(), 1);
    assert!(proxy.mounted_instances().contains(&mounted_one));
}

#[test]
fn tracking_does_not_keep_instances_alive() {
    let proxy = PrototypeProxy::from_definition(&counter("v1")).unwrap();
    let instance = proxy.instantiate();
    let weak = instance.downgrade();
    mount(&instance);

    drop(instance);

    assert!(!weak.is_alive());
    assert_eq!(proxy.mounted_instances().len(), 1);
    assert!(proxy.mounted_instances().instances().is_empty());
}

#[test]
fn renderer_drives_lifecycle() {
    let proxy = PrototypeProxy::from_definition(&static_property(42)).unwrap();
    let mut renderer = ShallowRenderer::new();

    renderer.render(&proxy.get()).unwrap();
    renderer.render(&proxy.get()).unwrap();
    assert_eq!(proxy.mounted_instances().len(), 1);
    assert!(proxy.mounted_instances().contains(renderer.instance().unwrap()));

    proxy.update(&static_property(43)).unwrap();
    for instance in proxy.mounted_instances().iter() {
        assert_eq!(instance.call_method("render", &[]).unwrap(), Value::from(43));
    }

    renderer.unmount().unwrap();
    assert!(proxy.mounted_instances().is_empty());
}

#[test]
fn separate_proxies_track_separately() {
    let first = PrototypeProxy::from_definition(&counter("a")).unwrap();
    let second = PrototypeProxy::from_definition(&counter("b")).unwrap();

    mount(&first.instantiate());
    let kept = second.instantiate();
    mount(&kept);
    mount(&second.instantiate());

    assert_eq!(first.mounted_instances().len(), 1);
    assert_eq!(second.mounted_instances().len(), 2);
}

proptest! {
    #[test]
    fn prop_mounted_len_is_mounts_minus_unmounts(
        ops in proptest::collection::vec((0..4usize, any::<bool>()), 0..40)
    ) {
        let proxy = PrototypeProxy::from_definition(&counter("v1")).unwrap();
        let pool: Vec<_> = (0..4).map(|_| proxy.instantiate()).collect();
        let mut model: Vec<usize> = Vec::new();

        for (index, is_mount) in ops {
            if is_mount {
                mount(&pool[index]);
                model.push(index);
            } else {
                unmount(&pool[index]);
                if let Some(pos) = model.iter().position(|i| *i == index) {
                    model.remove(pos);
                }
            }
        }

        let expected: Vec<_> = model.iter().map(|i| pool[*i].id()).collect();
        prop_assert_eq!(proxy.mounted_instances().ids(), expected);
    }
}
