fn main() {
    pawcare_lib::run()
}
