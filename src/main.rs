fn main() -> std::process::ExitCode {
    ocrdrop_lib::run()
}
