use attractor::kernels::mixing::{hyperchaos_mix, lattice_mix, normalize_length, xor_mix};
use attractor::kernels::trajectory::fold;
use bolero::check;

#[test]
fn fuzz_fold_output_size() {
    check!()
        .with_type::<(Vec<u8>, u8)>()
        .for_each(|(stream, size)| {
            let size = usize::from(*size % 128) + 1;
            match fold(stream, size) {
                Ok(out) => assert_eq!(out.len(), size),
                Err(_) => assert!(stream.is_empty()),
            }
        });
}

#[test]
fn fuzz_mixers_preserve_length() {
    check!()
        .with_type::<(Vec<u8>, Vec<u8>)>()
        .for_each(|(data, salt)| {
            let usable = !data.is_empty() && !salt.is_empty();
            for mix in [xor_mix, hyperchaos_mix, lattice_mix] {
                match mix(data, salt) {
                    Ok(out) => assert_eq!(out.len(), data.len()),
                    Err(_) => assert!(!usable),
                }
            }
        });
}

#[test]
fn fuzz_normalize_length() {
    check!()
        .with_type::<(Vec<u8>, u8)>()
        .for_each(|(buffer, len)| {
            let len = usize::from(*len);
            let out = normalize_length(buffer.clone(), len);
            assert_eq!(out.len(), len);

            let kept = buffer.len().min(len);
            assert_eq!(&out[..kept], &buffer[..kept]);
        });
}
